use rand::prelude::Distribution;

use crate::{
    math::{
        distributions::UnitBall2,
        quaternion::{LookAt, Quat},
        vec::Vec3,
    },
    ray::Ray,
};

/// A thin lens camera. The sensor is centered on `origin` and faces the local
/// `-Z` axis; `rotation` orients it in world space.
pub struct Camera {
    /// Sensor width, in pixels.
    pub width: u32,
    /// Sensor height, in pixels.
    pub height: u32,
    /// Exactly `width / height` in f32.
    pub aspect: f32,

    /// Half extent of the viewport, in world units.
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub focal_length: f32,
    pub origin: Vec3,
    pub rotation: Quat,
    /// Lens diameter. 0 disables defocus blur.
    pub aperture: f32,
}

impl Camera {
    pub fn new(
        width: u32,
        height: u32,
        vfov: f32,
        focal_length: f32,
        origin: Vec3,
        rotation: Quat,
        aperture: f32,
    ) -> Self {
        let aspect = width as f32 / height as f32;
        let h = f32::tan(vfov / 2.);

        Self {
            width,
            height,
            aspect,
            viewport_height: focal_length * h,
            viewport_width: focal_length * h * aspect,
            focal_length,
            origin,
            rotation,
            aperture,
        }
    }

    /// Camera aimed at `target` from `eye`, focused on the target plane.
    pub fn look_at(
        width: u32,
        height: u32,
        vfov: f32,
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        aperture: f32,
    ) -> Self {
        let focal_length = (target - eye).length();
        let rotation = Quat::from(LookAt { eye, target, up });
        Self::new(width, height, vfov, focal_length, eye, rotation, aperture)
    }

    /// Primary ray through viewport coordinates, with stochastic defocus.
    pub fn ray(&self, vx: f32, vy: f32, rng: &mut dyn rand::RngCore) -> Ray {
        let [dx, dy] = UnitBall2.sample(rng);
        let offset = self.aperture / 2.0 * Vec3::new(dx, dy, 0.0);

        // vy grows downward in pixel space, local Y points up
        let direction = -self.focal_length * Vec3::Z - offset
            + vx * self.viewport_width * Vec3::X
            - vy * self.viewport_height * Vec3::Y;

        Ray::new(
            self.origin + self.rotation.mul_vec3(offset),
            self.rotation.mul_vec3(direction),
        )
    }
}

/// Coordinates in pixel space, `(0, 0)` is the top left corner.
#[derive(Debug, Clone, Copy)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

/// Coordinates in viewport space, `[-1, 1]` on both axes, `(-1, -1)` is the
/// top left corner.
#[derive(Debug, Clone, Copy)]
pub struct ViewportCoord {
    pub vx: f32,
    pub vy: f32,
}

impl ViewportCoord {
    pub fn from_pixel_coord(camera: &Camera, coord: PixelCoord) -> Self {
        // a single-pixel axis has no extent to spread over, its pixel sits
        // in the middle of the viewport
        let axis = |coord: u32, extent: u32| {
            if extent > 1 {
                2. * (coord as f32 / (extent - 1) as f32) - 1.
            } else {
                0.0
            }
        };

        Self {
            vx: axis(coord.x, camera.width),
            vy: axis(coord.y, camera.height),
        }
    }
}
