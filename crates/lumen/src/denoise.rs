use glam::Vec3;
use image::Rgb32FImage;

use crate::{math::vec::RgbAsVec3Ext, renderer::OutputBuffers};

/// Edge stopping weights of the à-trous filter. Smaller sigmas preserve more
/// detail from the matching guide channel. The noisy color itself carries no
/// weight, only the low variance guides do.
pub struct DenoiseParams {
    pub passes: u32,
    pub sigma_albedo: f32,
    pub sigma_normal: f32,
    pub sigma_z: f32,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            passes: 3,
            sigma_albedo: 0.2,
            sigma_normal: 0.3,
            sigma_z: 0.5,
        }
    }
}

// B3 spline, the classic à-trous kernel
const KERNEL: [f32; 5] = [1. / 16., 4. / 16., 6. / 16., 4. / 16., 1. / 16.];

/// Smooth the color channel while stopping at edges visible in the albedo,
/// normal and depth guides. This is what the `--noise` flag bypasses.
pub fn denoise(buffers: &OutputBuffers, params: &DenoiseParams) -> Rgb32FImage {
    let (width, height) = buffers.color.dimensions();
    let mut color = buffers.color.clone();

    let guide = |x: u32, y: u32| -> (Vec3, Vec3, f32) {
        (
            buffers.albedo.get_pixel(x, y).vec(),
            buffers.normal.get_pixel(x, y).vec(),
            buffers.z.get_pixel(x, y).0[0],
        )
    };

    for pass in 0..params.passes {
        let step = 1i64 << pass;
        let mut next = color.clone();

        for y in 0..height {
            for x in 0..width {
                let (albedo_c, normal_c, z_c) = guide(x, y);

                let mut sum = Vec3::ZERO;
                let mut weight_sum = 0.0;

                for (j, kj) in KERNEL.iter().enumerate() {
                    for (i, ki) in KERNEL.iter().enumerate() {
                        let tx = x as i64 + (i as i64 - 2) * step;
                        let ty = y as i64 + (j as i64 - 2) * step;
                        if tx < 0 || ty < 0 || tx >= width as i64 || ty >= height as i64 {
                            continue;
                        }
                        let (tx, ty) = (tx as u32, ty as u32);

                        let sample = color.get_pixel(tx, ty).vec();
                        let (albedo, normal, z) = guide(tx, ty);

                        let w_albedo = f32::exp(
                            -albedo_c.distance_squared(albedo)
                                / (params.sigma_albedo * params.sigma_albedo),
                        );
                        let w_normal = f32::exp(
                            -normal_c.distance_squared(normal)
                                / (params.sigma_normal * params.sigma_normal),
                        );
                        let dz = z_c - z;
                        let w_z = f32::exp(-dz * dz / (params.sigma_z * params.sigma_z));

                        let weight = ki * kj * w_albedo * w_normal * w_z;
                        sum += weight * sample;
                        weight_sum += weight;
                    }
                }

                *next.get_pixel_mut(x, y) = image::Rgb((sum / weight_sum).to_array());
            }
        }

        color = next;
    }

    color
}
