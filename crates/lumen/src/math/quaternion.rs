use glam::{Mat3, Vec3};

pub use glam::Quat;

use super::vec::Vec3AsNonZero;

/// Camera orientation from an eye position, a target point and an up vector.
///
/// The resulting rotation maps the local frame to world space with the camera
/// facing `-Z`, `+X` to the right of the image and `+Y` toward `up`.
pub struct LookAt {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl From<LookAt> for Quat {
    fn from(this: LookAt) -> Self {
        let z = (this.eye - this.target).normalize();
        let x = match this.up.cross(z).as_non_zero(1e-4) {
            Some(x) => x.normalize(),
            // up is colinear with the view direction, any roll goes
            None => Vec3::X.cross(z).as_non_zero(1e-4).unwrap_or(Vec3::Y).normalize(),
        };
        let y = z.cross(x);

        Quat::from_mat3(&Mat3::from_cols(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_faces_the_target() {
        let eye = Vec3::new(0.2, 0.2, 0.2);
        let target = Vec3::ZERO;
        let rotation = Quat::from(LookAt {
            eye,
            target,
            up: Vec3::Z,
        });

        let forward = rotation.mul_vec3(-Vec3::Z);
        let expected = (target - eye).normalize();
        assert!(forward.distance(expected) < 1e-5);
    }

    #[test]
    fn degenerate_up_still_yields_a_rotation() {
        let rotation = Quat::from(LookAt {
            eye: Vec3::ZERO,
            target: Vec3::Z,
            up: Vec3::Z,
        });
        assert!(rotation.is_finite());
        assert!((rotation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn up_maps_to_local_y() {
        let rotation = Quat::from(LookAt {
            eye: Vec3::ZERO,
            target: -Vec3::Z,
            up: Vec3::Y,
        });
        assert!(rotation.mul_vec3(Vec3::Y).distance(Vec3::Y) < 1e-5);
    }
}
