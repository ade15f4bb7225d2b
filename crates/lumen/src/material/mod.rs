mod diffuse;
mod emit;
mod principled;
pub mod texture;

pub use diffuse::Diffuse;
pub use emit::Emit;
pub use principled::Principled;

use crate::{color::Color, ray::Ray, shape::local_info};

pub trait Material: Sync + Send {
    fn scatter(
        &self,
        ray: Ray,
        record: &local_info::Full,
        rng: &mut dyn rand::RngCore,
    ) -> Scattered;
}

/// Outcome of a scattering event. `ray_out: None` terminates the path and
/// `albedo` is then the emitted radiance.
pub struct Scattered {
    pub albedo: Color,
    pub ray_out: Option<Ray>,
}

pub struct MaterialDescriptor {
    pub label: Option<String>,
    pub material: Box<dyn Material>,
}

impl std::fmt::Debug for MaterialDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialDescriptor")
            .field("label", &self.label)
            .field("material", &"<material>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(pub usize);
