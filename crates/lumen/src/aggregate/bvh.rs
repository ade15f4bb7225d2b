use glam::Vec3;

use crate::{
    math::bounds::Bounds,
    ray::Ray,
    shape::{FullIntersectionResult, IntersectionResult, Shape},
};

use super::ShapeList;

/// Bounding volume hierarchy, built top down by median split along the
/// dominant axis of the bounding box.
pub struct Bvh {
    bounds: Bounds,
    node: BvhNode,
}

enum BvhNode {
    Node(Box<Bvh>, Box<Bvh>),
    Leaf(Box<dyn Shape>),
}

impl Bvh {
    /// Panics on an empty list; callers keep empty scenes in a [ShapeList].
    pub fn build(shapes: ShapeList) -> Self {
        let ShapeList(mut shapes) = shapes;
        let n = shapes.len();
        assert!(n > 0, "cannot build a BVH out of no shapes");

        if n == 1 {
            let shape = shapes.remove(0);
            return Self {
                bounds: shape.bounding_box(),
                node: BvhNode::Leaf(shape),
            };
        }

        let bounds = shapes
            .iter()
            .fold(Bounds::EMPTY, |b, s| b.union(s.bounding_box()));

        let Vec3 { x, y, z } = bounds.diag();
        let axis: fn(Vec3) -> f32 = if x >= y && x >= z {
            |v| v.x
        } else if y >= z {
            |v| v.y
        } else {
            |v| v.z
        };

        shapes.sort_by(|a, b| {
            let a = axis(a.bounding_box().centroid());
            let b = axis(b.bounding_box().centroid());
            a.total_cmp(&b)
        });

        let right = shapes.split_off(n / 2);
        let left = shapes;

        Self {
            bounds,
            node: BvhNode::Node(
                Box::new(Self::build(ShapeList(left))),
                Box::new(Self::build(ShapeList(right))),
            ),
        }
    }
}

impl Shape for Bvh {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        if !self.bounds.ray_intersect(&ray) {
            return IntersectionResult::NoIntersection;
        }

        match &self.node {
            BvhNode::Leaf(shape) => shape.intersection_full(ray),
            BvhNode::Node(a, b) => match a.intersection_full(ray) {
                IntersectionResult::Intersection(record) => {
                    let clipped = Ray {
                        bounds: (ray.bounds.0, record.t),
                        ..ray
                    };
                    match b.intersection_full(clipped) {
                        hit @ IntersectionResult::Intersection(_) => hit,
                        IntersectionResult::NoIntersection => {
                            IntersectionResult::Intersection(record)
                        }
                    }
                }
                IntersectionResult::NoIntersection => b.intersection_full(ray),
            },
        }
    }

    fn intersect_bare(&self, ray: Ray) -> bool {
        if !self.bounds.ray_intersect(&ray) {
            return false;
        }
        match &self.node {
            BvhNode::Leaf(shape) => shape.intersect_bare(ray),
            BvhNode::Node(a, b) => a.intersect_bare(ray) || b.intersect_bare(ray),
        }
    }

    fn bounding_box(&self) -> Bounds {
        self.bounds
    }
}
