use std::ops::Add;

use glam::Vec3;
use image::{ImageBuffer, Rgb32FImage};

use crate::{
    aggregate::Bvh,
    color::{self, Color},
    material::{MaterialDescriptor, MaterialId},
    math::vec::{RgbAsVec3Ext, Vec3AsRgbExt},
    scene::Scene,
    shape::Shape,
};

/// Immutable scene snapshot handed to integrators.
pub struct World {
    pub objects: Box<dyn Shape>,
    pub materials: Vec<MaterialDescriptor>,
    pub dome_material: MaterialId,
}

impl From<Scene> for World {
    fn from(scene: Scene) -> Self {
        let dome_material = scene.dome_material();
        let objects: Box<dyn Shape> = if scene.objects.is_empty() {
            Box::new(scene.objects)
        } else {
            Box::new(Bvh::build(scene.objects))
        };

        Self {
            objects,
            materials: scene.materials,
            dome_material,
        }
    }
}

/// Accumulated result of one or more samples through a pixel.
pub struct RayResult {
    pub color: Color,
    pub albedo: Color,
    pub normal: Vec3,
    pub z: f32,
    pub samples_accumulated: u32,
}

impl RayResult {
    /// Average the accumulated samples down to a single pixel value.
    pub fn as_pixel(&self) -> PixelRenderResult {
        let inv_samples = 1.0 / self.samples_accumulated.max(1) as f32;
        GenericRenderResult {
            color: (inv_samples * self.color.vec()).rgb(),
            albedo: (inv_samples * self.albedo.vec()).rgb(),
            normal: (inv_samples * self.normal).rgb(),
            z: inv_samples * self.z,
        }
    }
}

impl Default for RayResult {
    fn default() -> Self {
        Self {
            color: color::BLACK,
            albedo: color::BLACK,
            normal: Vec3::ZERO,
            z: 0.0,
            samples_accumulated: 0,
        }
    }
}

impl Add for RayResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            color: (self.color.vec() + rhs.color.vec()).rgb(),
            albedo: (self.albedo.vec() + rhs.albedo.vec()).rgb(),
            normal: self.normal + rhs.normal,
            z: self.z + rhs.z,
            samples_accumulated: self.samples_accumulated + rhs.samples_accumulated,
        }
    }
}

/// The channel set produced for every pixel, generic over storage so the same
/// shape describes a single pixel and whole image planes.
#[derive(Debug, Clone, Copy)]
pub struct GenericRenderResult<RgbStorage, LumaStorage> {
    pub color: RgbStorage,
    pub albedo: RgbStorage,
    pub normal: RgbStorage,
    pub z: LumaStorage,
}

pub type PixelRenderResult = GenericRenderResult<Color, f32>;

pub type Luma32FImage = ImageBuffer<image::Luma<f32>, Vec<f32>>;
pub type OutputBuffers = GenericRenderResult<Rgb32FImage, Luma32FImage>;

impl OutputBuffers {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color: ImageBuffer::new(width, height),
            albedo: ImageBuffer::new(width, height),
            normal: ImageBuffer::new(width, height),
            z: ImageBuffer::new(width, height),
        }
    }

    pub fn put(&mut self, x: u32, y: u32, d: PixelRenderResult) {
        *self.color.get_pixel_mut(x, y) = d.color;
        *self.albedo.get_pixel_mut(x, y) = d.albedo;
        *self.normal.get_pixel_mut(x, y) = d.normal;
        *self.z.get_pixel_mut(x, y) = image::Luma([d.z]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_averages_accumulated_samples() {
        let sum = RayResult {
            color: Color::from([2.0, 4.0, 8.0]),
            albedo: Color::from([1.0, 1.0, 1.0]),
            normal: Vec3::new(0.0, 2.0, 0.0),
            z: 6.0,
            samples_accumulated: 2,
        };
        let pixel = sum.as_pixel();
        assert_eq!(pixel.color.0, [1.0, 2.0, 4.0]);
        assert_eq!(pixel.z, 3.0);
        assert_eq!(pixel.normal.0, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn world_snapshot_keeps_the_dome_material_id() {
        let mut scene = Scene::new();
        let dome = scene.dome_material();
        scene.insert_material(MaterialDescriptor {
            label: None,
            material: Box::new(crate::material::Emit {
                texture: Box::new(crate::material::texture::Uniform(color::gray(0.5))),
            }),
        });

        let world = World::from(scene);
        assert_eq!(world.dome_material, dome);
        assert_eq!(world.materials.len(), 2);
    }

    #[test]
    fn add_accumulates_sample_counts() {
        let a = RayResult {
            samples_accumulated: 3,
            ..Default::default()
        };
        let b = RayResult {
            samples_accumulated: 5,
            ..Default::default()
        };
        assert_eq!((a + b).samples_accumulated, 8);
    }
}
