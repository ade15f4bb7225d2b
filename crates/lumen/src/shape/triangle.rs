use glam::Vec3;

use crate::{material::MaterialId, math::bounds::Bounds, ray::Ray};

use super::{local_info, FullIntersectionResult, IntersectionResult, RayIntersection, Shape};

/// A triangle with per vertex normals, interpolated at the hit point.
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub material: MaterialId,
}

impl Triangle {
    /// Flat shaded triangle, normal from the winding of the vertices.
    pub fn flat(vertices: [Vec3; 3], material: MaterialId) -> Self {
        let normal = (vertices[1] - vertices[0])
            .cross(vertices[2] - vertices[0])
            .normalize_or_zero();
        Self {
            vertices,
            normals: [normal; 3],
            material,
        }
    }

    /// Möller-Trumbore. Returns `(t, u, v)`, the barycentrics weighting
    /// vertices 1 and 2.
    fn intersect_inner(&self, ray: Ray) -> Option<(f32, f32, f32)> {
        let [v0, v1, v2] = self.vertices;
        let e1 = v1 - v0;
        let e2 = v2 - v0;

        let pvec = ray.direction.cross(e2);
        let det = e1.dot(pvec);
        if det.abs() < 1e-12 {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin - v0;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(e1);
        let v = ray.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(qvec) * inv_det;
        if !ray.range().contains(&t) {
            return None;
        }

        Some((t, u, v))
    }
}

impl Shape for Triangle {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        match self.intersect_inner(ray) {
            Some((t, u, v)) => {
                let w = 1.0 - u - v;
                let normal = (w * self.normals[0] + u * self.normals[1] + v * self.normals[2])
                    .normalize_or_zero();
                IntersectionResult::Intersection(RayIntersection {
                    t,
                    local_info: local_info::Full {
                        pos: ray.at(t),
                        normal,
                        material: self.material,
                        uv: [u, v],
                    },
                })
            }
            None => IntersectionResult::NoIntersection,
        }
    }

    fn intersect_bare(&self, ray: Ray) -> bool {
        self.intersect_inner(ray).is_some()
    }

    fn bounding_box(&self) -> Bounds {
        Bounds::from_points(&self.vertices)
    }
}
