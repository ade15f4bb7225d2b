use glam::Vec3;
use rand::prelude::Distribution;

use crate::{
    math::{distributions::UnitBall3, vec::Vec3AsNonZero},
    ray::Ray,
    shape::local_info,
};

use super::{texture::Texture, Material, Scattered};

pub struct Diffuse {
    pub texture: Box<dyn Texture>,
}

impl Material for Diffuse {
    fn scatter(
        &self,
        _ray: Ray,
        record: &local_info::Full,
        rng: &mut dyn rand::RngCore,
    ) -> Scattered {
        let direction = record.normal + Vec3::from_array(UnitBall3.sample(rng));
        let direction = direction.as_non_zero(1e-4).unwrap_or(record.normal);

        Scattered {
            ray_out: Some(Ray::new(record.pos, direction)),
            albedo: self.texture.color(record.uv),
        }
    }
}
