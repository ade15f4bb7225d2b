use glam::Vec3;
use rand::distributions::{Distribution, Uniform};

use crate::{
    color::Color,
    math::{
        distributions::UnitBall3,
        vec::{ReflectVecExt, RgbAsVec3Ext, Vec3AsNonZero, Vec3AsRgbExt},
    },
    ray::Ray,
    shape::local_info,
};

use super::{Material, Scattered};

/// Two lobe material driven by the classic principled scalar set: a diffuse
/// base and a roughness blurred specular reflection, picked stochastically
/// with a fresnel weight.
pub struct Principled {
    pub base_color: Color,
    /// 0 is a mirror, 1 fully blurs the specular lobe.
    pub roughness: f32,
    /// Scales the specular reflectance at normal incidence, [0, 1].
    pub specular: f32,
    /// Grazing angle tint on the diffuse lobe, [0, 1].
    pub sheen: f32,
}

/// Schlick approximation of the fresnel reflectance.
fn schlick(cos: f32, f0: f32) -> f32 {
    f0 + (1.0 - f0) * f32::powi(1.0 - cos, 5)
}

// Reflectance at normal incidence of a dielectric with ior 1.5, the
// conventional anchor for specular = 1.
const F0_SCALE: f32 = 0.08;

impl Material for Principled {
    fn scatter(
        &self,
        ray: Ray,
        record: &local_info::Full,
        rng: &mut dyn rand::RngCore,
    ) -> Scattered {
        let cos = (-ray.direction).dot(record.normal).clamp(0.0, 1.0);
        let grazing = f32::powi(1.0 - cos, 5);

        // specular scales the whole lobe so 0 disables it even at grazing
        let reflect_p = self.specular * schlick(cos, F0_SCALE);
        let uniform = Uniform::new_inclusive(0.0, 1.0);

        if uniform.sample(rng) < reflect_p {
            // specular lobe, fuzzed by roughness
            let reflected = ray.direction.reflect(record.normal);
            let fuzz = self.roughness * Vec3::from_array(UnitBall3.sample(rng));
            let direction = (reflected + fuzz).as_non_zero(1e-4).unwrap_or(reflected);

            let ray_out = (direction.dot(record.normal) > 0.0)
                .then(|| Ray::new(record.pos, direction));
            Scattered {
                ray_out,
                albedo: Vec3::ONE.rgb(),
            }
        } else {
            // diffuse lobe with a sheen boost toward grazing angles
            let direction = record.normal + Vec3::from_array(UnitBall3.sample(rng));
            let direction = direction.as_non_zero(1e-4).unwrap_or(record.normal);

            let albedo = (self.base_color.vec() * (1.0 + self.sheen * grazing))
                .clamp(Vec3::ZERO, Vec3::ONE);
            Scattered {
                ray_out: Some(Ray::new(record.pos, direction)),
                albedo: albedo.rgb(),
            }
        }
    }
}
