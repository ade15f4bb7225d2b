use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

use super::vec::Vec3;

/// Uniform distribution over the unit 3-ball, by rejection.
#[derive(Default)]
pub struct UnitBall3;

impl Distribution<[f32; 3]> for UnitBall3 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 3] {
        let uniform = Uniform::new(-1., 1.);
        loop {
            let x = uniform.sample(rng);
            let y = uniform.sample(rng);
            let z = uniform.sample(rng);
            if x * x + y * y + z * z <= 1. {
                return [x, y, z];
            }
        }
    }
}

/// Uniform distribution over the unit disk.
pub struct UnitBall2;

impl Distribution<[f32; 2]> for UnitBall2 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 2] {
        let uniform = Uniform::new(0., 1.);
        let phi = std::f32::consts::TAU * uniform.sample(rng);
        let r = f32::sqrt(uniform.sample(rng));
        let (s, c) = f32::sin_cos(phi);
        [r * c, r * s]
    }
}

/// Spherical uv coordinates of a direction, y up.
pub fn sphere_uv_from_direction(direction: Vec3) -> [f32; 2] {
    let h = direction.dot(Vec3::Y).clamp(-1.0, 1.0);
    let u = 0.5 + f32::atan2(direction.x, direction.z) / std::f32::consts::TAU;
    let v = f32::acos(h) / std::f32::consts::PI;

    [u, v]
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn unit_ball_samples_are_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let [x, y, z] = UnitBall3.sample(&mut rng);
            assert!(x * x + y * y + z * z <= 1.0);
        }
    }

    #[test]
    fn disk_samples_are_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let [x, y] = UnitBall2.sample(&mut rng);
            assert!(x * x + y * y <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn sphere_uv_covers_poles() {
        let [_, v_top] = sphere_uv_from_direction(Vec3::Y);
        let [_, v_bottom] = sphere_uv_from_direction(-Vec3::Y);
        assert!(v_top.abs() < 1e-6);
        assert!((v_bottom - 1.0).abs() < 1e-6);
    }
}
