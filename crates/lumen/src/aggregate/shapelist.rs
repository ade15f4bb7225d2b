use crate::{
    math::bounds::Bounds,
    ray::Ray,
    shape::{FullIntersectionResult, IntersectionResult, Shape},
};

/// Linear aggregate, every shape is tested in turn.
#[derive(Default)]
pub struct ShapeList(pub Vec<Box<dyn Shape>>);

impl ShapeList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Shape for ShapeList {
    fn intersection_full(&self, mut ray: Ray) -> FullIntersectionResult {
        let mut res = IntersectionResult::NoIntersection;

        for shape in self.0.iter() {
            if let IntersectionResult::Intersection(record) = shape.intersection_full(ray) {
                // clip subsequent shapes to the nearest hit so far
                ray.bounds.1 = record.t;
                res = IntersectionResult::Intersection(record);
            }
        }
        res
    }

    fn intersect_bare(&self, ray: Ray) -> bool {
        self.0.iter().any(|shape| shape.intersect_bare(ray))
    }

    fn bounding_box(&self) -> Bounds {
        self.0
            .iter()
            .fold(Bounds::EMPTY, |b, shape| b.union(shape.bounding_box()))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::{material::MaterialId, shape::Sphere};

    use super::*;

    fn sphere_at(z: f32, material: usize) -> Box<dyn Shape> {
        Box::new(Sphere {
            center: Vec3::new(0.0, 0.0, z),
            radius: 0.5,
            material: MaterialId(material),
        })
    }

    #[test]
    fn nearest_shape_wins() {
        let list = ShapeList(vec![sphere_at(5.0, 0), sphere_at(2.0, 1), sphere_at(8.0, 2)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let IntersectionResult::Intersection(hit) = list.intersection_full(ray) else {
            panic!("expected a hit");
        };
        assert_eq!(hit.local_info.material.0, 1);
        assert!((hit.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn empty_list_never_hits() {
        let list = ShapeList::default();
        assert!(!list
            .intersection_full(Ray::new(Vec3::ZERO, Vec3::Z))
            .is_intersection());
    }
}
