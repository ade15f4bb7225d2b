mod pathtracer;

pub use pathtracer::PathTracer;

use crate::{ray::Ray, renderer::{RayResult, World}};

pub trait Integrator: Send + Sync {
    fn ray_cast(&self, world: &World, ray: Ray, depth: u32) -> RayResult;
}
