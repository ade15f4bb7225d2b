mod sphere;
mod triangle;

pub use sphere::Sphere;
pub use triangle::Triangle;

use crate::{math::bounds::Bounds, ray::Ray};

/// A shape renderable by ray tracing: something a ray can intersect, with
/// enough local information at the hit point to shade it.
pub trait Shape: Send + Sync {
    /// Nearest intersection of `ray` within its clip range, with full local
    /// information.
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult;

    /// Cheap predicate used for occlusion rays.
    fn intersect_bare(&self, ray: Ray) -> bool;

    fn bounding_box(&self) -> Bounds;
}

pub mod local_info {
    use glam::Vec3;

    use crate::material::MaterialId;

    /// Everything shading needs at a hit point.
    #[derive(Debug)]
    pub struct Full {
        pub pos: Vec3,
        pub normal: Vec3,
        pub material: MaterialId,
        pub uv: [f32; 2],
    }
}

/// Local information plus the ray time of the hit.
#[derive(Debug)]
pub struct RayIntersection<LocalInfo> {
    pub t: f32,
    pub local_info: LocalInfo,
}

#[derive(Debug)]
pub enum IntersectionResult<LocalInfo> {
    Intersection(RayIntersection<LocalInfo>),
    NoIntersection,
}

impl<LocalInfo> IntersectionResult<LocalInfo> {
    pub fn is_intersection(&self) -> bool {
        matches!(self, IntersectionResult::Intersection(_))
    }
}

pub type FullIntersectionResult = IntersectionResult<local_info::Full>;
