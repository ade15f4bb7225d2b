use glam::Vec3;

use crate::ray::Ray;

/// Axis aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Empty bounds, neutral element of [Bounds::union].
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |b, p| Self {
            min: b.min.min(*p),
            max: b.max.max(*p),
        })
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn centroid(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    pub fn diag(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test. Returns true when `ray` crosses the box inside its clip range.
    pub fn ray_intersect(&self, ray: &Ray) -> bool {
        let inv = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;

        let t_min = t0.min(t1).max_element().max(ray.bounds.0);
        let t_max = t0.max(t1).min_element().min(ray.bounds.1);

        t_min <= t_max
    }
}
