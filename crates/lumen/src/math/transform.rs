use glam::{Quat, Vec3};

/// Scale, then rotation, then translation.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rot: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
        rot: Quat::IDENTITY,
    };

    pub fn scaling(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        self.rot.mul_vec3(self.scale * p) + self.translation
    }

    /// Valid for uniform scale, which is all the mesh path uses.
    pub fn apply_normal(&self, n: Vec3) -> Vec3 {
        self.rot.mul_vec3(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_a_fixed_point() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::IDENTITY.apply_point(p), p);
    }

    #[test]
    fn scaling_scales_points_not_normals() {
        let t = Transform::scaling(Vec3::splat(0.3));
        assert!(t.apply_point(Vec3::ONE).distance(Vec3::splat(0.3)) < 1e-6);
        assert!(t.apply_normal(Vec3::X).distance(Vec3::X) < 1e-6);
    }
}
