use glam::Vec3;

use crate::{
    material::MaterialId,
    math::{bounds::Bounds, distributions::sphere_uv_from_direction},
    ray::Ray,
};

use super::{local_info, FullIntersectionResult, IntersectionResult, RayIntersection, Shape};

pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    fn solve_t(&self, ray: Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b_half = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant_quarter = b_half * b_half - a * c;
        if discriminant_quarter < 0.0 {
            return None;
        }

        let sqrt_d = f32::sqrt(discriminant_quarter);
        // nearest root in range, else the far one
        let t = (-b_half - sqrt_d) / a;
        if ray.range().contains(&t) {
            return Some(t);
        }
        let t = (-b_half + sqrt_d) / a;
        ray.range().contains(&t).then_some(t)
    }
}

impl Shape for Sphere {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        match self.solve_t(ray) {
            Some(t) => {
                let pos = ray.at(t);
                let normal = (pos - self.center).normalize();
                IntersectionResult::Intersection(RayIntersection {
                    t,
                    local_info: local_info::Full {
                        pos,
                        normal,
                        material: self.material,
                        uv: sphere_uv_from_direction(normal),
                    },
                })
            }
            None => IntersectionResult::NoIntersection,
        }
    }

    fn intersect_bare(&self, ray: Ray) -> bool {
        self.solve_t(ray).is_some()
    }

    fn bounding_box(&self) -> Bounds {
        Bounds {
            min: self.center - Vec3::splat(self.radius),
            max: self.center + Vec3::splat(self.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontal_ray_hits_the_near_side() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 0.0, 2.0),
            radius: 1.0,
            material: MaterialId(0),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let IntersectionResult::Intersection(hit) = sphere.intersection_full(ray) else {
            panic!("expected a hit");
        };
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!(hit.local_info.normal.distance(-Vec3::Z) < 1e-5);
    }

    #[test]
    fn ray_from_inside_hits_the_far_side() {
        let sphere = Sphere {
            center: Vec3::ZERO,
            radius: 1.0,
            material: MaterialId(0),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let IntersectionResult::Intersection(hit) = sphere.intersection_full(ray) else {
            panic!("expected a hit");
        };
        assert!((hit.t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tangentially_offset_ray_misses() {
        let sphere = Sphere {
            center: Vec3::new(0.0, 5.0, 0.0),
            radius: 1.0,
            material: MaterialId(0),
        };
        assert!(!sphere.intersect_bare(Ray::new(Vec3::ZERO, Vec3::X)));
    }
}
