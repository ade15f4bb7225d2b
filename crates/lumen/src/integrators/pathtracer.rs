use crate::{
    color,
    math::{
        distributions::sphere_uv_from_direction,
        vec::{RgbAsVec3Ext, Vec3AsRgbExt},
    },
    ray::Ray,
    renderer::{RayResult, World},
    shape::{local_info, IntersectionResult},
};

use super::Integrator;

/// Unidirectional path tracer. Rays that escape the scene sample the dome
/// material.
pub struct PathTracer {
    pub max_depth: u32,
}

impl Integrator for PathTracer {
    fn ray_cast(&self, world: &World, ray: Ray, depth: u32) -> RayResult {
        if depth == self.max_depth {
            return RayResult::default();
        }

        let mut rng = rand::thread_rng();

        // offset against self intersection
        let ray = Ray::new_with_range(ray.origin, ray.direction, 1e-3..ray.bounds.1);

        let IntersectionResult::Intersection(record) = world.objects.intersection_full(ray)
        else {
            return self.dome_ray(world, ray);
        };

        let material = &world.materials[record.local_info.material.0].material;
        let scattered = material.scatter(ray, &record.local_info, &mut rng);

        let incoming = match scattered.ray_out {
            Some(ray_out) => self.ray_cast(world, ray_out, depth + 1).color,
            None => color::WHITE,
        };
        let color = (incoming.vec() * scattered.albedo.vec()).rgb();

        RayResult {
            color,
            albedo: scattered.albedo,
            normal: record.local_info.normal,
            z: record.t,
            samples_accumulated: 1,
        }
    }
}

impl PathTracer {
    fn dome_ray(&self, world: &World, ray: Ray) -> RayResult {
        let mut rng = rand::thread_rng();

        let material = &world.materials[world.dome_material.0].material;
        let record = local_info::Full {
            pos: ray.origin,
            normal: -ray.direction,
            material: world.dome_material,
            uv: sphere_uv_from_direction(ray.direction),
        };

        let scattered = material.scatter(ray, &record, &mut rng);
        RayResult {
            color: scattered.albedo,
            samples_accumulated: 1,
            ..Default::default()
        }
    }
}
