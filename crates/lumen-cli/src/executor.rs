use std::{
    io::Write,
    sync::mpsc::{channel, Receiver},
};

use anyhow::Result;
use rand::distributions::{self, Distribution};
use rayon::iter::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator,
};

use lumen::{
    camera::{Camera, PixelCoord, ViewportCoord},
    integrators::Integrator,
    renderer::{OutputBuffers, PixelRenderResult, RayResult, World},
};

use crate::{
    progress::Progress,
    tile::{Tile, Tiler},
};

enum Message {
    Tile(TileMsg),
    Stop,
}

pub struct TileMsg {
    pub tile: Tile,
    pub data: Vec<PixelRenderResult>,
}

/// Drives the whole render: cuts the image into tiles, hands them to rayon
/// workers in sample batches and collects the results into output buffers.
pub struct Executor {
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    pub samples_per_pixel: u32,

    pub camera: Camera,
    pub integrator: Box<dyn Integrator>,
    pub world: World,
}

const SAMPLE_BATCH_SIZE: u32 = 32;

impl Executor {
    pub fn run(self) -> Result<OutputBuffers> {
        let mut output_buffers = OutputBuffers::new(self.width, self.height);

        let tiler = Tiler {
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
        };
        let tiles = tiler.tiles();

        let progress = Progress::new(self.samples_per_pixel as usize * tiles.len());

        let mut tiles_data: Vec<Vec<RayResult>> = tiles
            .iter()
            .map(|tile| {
                let mut data = Vec::new();
                data.resize_with(tile.len(), RayResult::default);
                data
            })
            .collect();

        let generation_result = rayon::scope(|s| {
            let (tx, rx) = channel();

            log::info!("generating image...");
            s.spawn(|_| {
                let rx: Receiver<Message> = rx;
                let mut last_progress_update = std::time::Instant::now();
                for msg in rx.iter() {
                    match msg {
                        Message::Tile(msg) => {
                            for (index, (x, y)) in msg.tile.pixels().enumerate() {
                                output_buffers.put(x, y, msg.data[index]);
                            }
                        }
                        Message::Stop => break,
                    }

                    if last_progress_update.elapsed() >= std::time::Duration::from_millis(300) {
                        print!("\r{progress}");
                        let _ = std::io::stdout().flush();
                        last_progress_update = std::time::Instant::now();
                    }
                }
                println!("\r{progress}");
            });

            let mut dispatch = |sample_count: u32| {
                tiles
                    .par_iter()
                    .zip(tiles_data.par_iter_mut())
                    .map(|(tile, data)| {
                        self.tile_worker(*tile, data, sample_count);
                        progress.add(sample_count as usize);

                        TileMsg {
                            tile: *tile,
                            data: data.iter().map(RayResult::as_pixel).collect(),
                        }
                    })
                    .try_for_each_init(
                        || tx.clone(),
                        |tx, msg: TileMsg| tx.send(Message::Tile(msg)),
                    )
            };

            let mut samples_to_do = self.samples_per_pixel;
            while samples_to_do > 0 {
                let samples = u32::min(SAMPLE_BATCH_SIZE, samples_to_do);
                samples_to_do -= samples;
                dispatch(samples)?;
            }
            tx.send(Message::Stop)
        });

        match generation_result {
            Ok(_) => log::info!("image fully generated"),
            Err(err) => log::warn!("image generation interrupted: {err}"),
        };

        Ok(output_buffers)
    }

    fn tile_worker(&self, tile: Tile, data: &mut [RayResult], sample_count: u32) {
        log::trace!("working on tile {tile:?}");
        for (index, (x, y)) in tile.pixels().enumerate() {
            data[index] = std::mem::take(&mut data[index])
                + self.pixel_worker(PixelCoord { x, y }, sample_count);
        }
    }

    fn pixel_worker(&self, coords: PixelCoord, samples: u32) -> RayResult {
        let ViewportCoord { vx, vy } = ViewportCoord::from_pixel_coord(&self.camera, coords);
        // no jitter on a single-pixel axis, the viewport has no extent there
        let half_pixel = |extent: u32| {
            if extent > 1 {
                0.5 / (extent as f32 - 1.)
            } else {
                0.0
            }
        };
        let half_width = half_pixel(self.camera.width);
        let half_height = half_pixel(self.camera.height);
        let distribution_x = distributions::Uniform::new_inclusive(-half_width, half_width);
        let distribution_y = distributions::Uniform::new_inclusive(-half_height, half_height);

        let mut rng = rand::thread_rng();
        (0..samples)
            .map(|_| {
                let dvx = distribution_x.sample(&mut rng);
                let dvy = distribution_y.sample(&mut rng);
                let camera_ray = self.camera.ray(vx + dvx, vy + dvy, &mut rng);
                self.integrator.ray_cast(&self.world, camera_ray, 0)
            })
            .fold(RayResult::default(), std::ops::Add::add)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use image::Rgb;
    use lumen::{
        integrators::PathTracer,
        material::{texture::Uniform, Emit, MaterialDescriptor},
        scene::Scene,
        shape::Sphere,
    };

    use super::*;

    fn executor_for(scene: Scene, spp: u32) -> Executor {
        Executor {
            width: 8,
            height: 8,
            tile_size: 4,
            samples_per_pixel: spp,
            camera: Camera::look_at(
                8,
                8,
                f32::to_radians(45.),
                Vec3::splat(0.2),
                Vec3::ZERO,
                Vec3::Z,
                0.0,
            ),
            integrator: Box::new(PathTracer { max_depth: 8 }),
            world: World::from(scene),
        }
    }

    #[test]
    fn empty_scene_renders_the_dome_everywhere() {
        let mut scene = Scene::new();
        scene.set_dome_light_intensity(0.75);

        let buffers = executor_for(scene, 4).run().unwrap();
        assert_eq!(buffers.color.dimensions(), (8, 8));
        for pixel in buffers.color.pixels() {
            assert!((pixel.0[0] - 0.75).abs() < 1e-5);
        }
    }

    #[test]
    fn one_pixel_wide_render_completes() {
        let mut scene = Scene::new();
        scene.set_dome_light_intensity(0.5);

        let executor = Executor {
            width: 1,
            height: 4,
            tile_size: 4,
            samples_per_pixel: 2,
            camera: Camera::look_at(
                1,
                4,
                f32::to_radians(45.),
                Vec3::splat(0.2),
                Vec3::ZERO,
                Vec3::Z,
                0.0,
            ),
            integrator: Box::new(PathTracer { max_depth: 8 }),
            world: World::from(scene),
        };

        let buffers = executor.run().unwrap();
        assert_eq!(buffers.color.dimensions(), (1, 4));
        for pixel in buffers.color.pixels() {
            assert!((pixel.0[0] - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn center_pixel_sees_an_emissive_sphere() {
        let mut scene = Scene::new();
        scene.set_dome_light_intensity(0.0);
        let glow = scene.insert_material(MaterialDescriptor {
            label: None,
            material: Box::new(Emit {
                texture: Box::new(Uniform(Rgb([3.0, 0.0, 0.0]))),
            }),
        });
        scene.insert_object(Sphere {
            center: Vec3::ZERO,
            radius: 0.05,
            material: glow,
        });

        let buffers = executor_for(scene, 8).run().unwrap();
        let center = buffers.color.get_pixel(4, 4);
        assert!(center.0[0] > 1.0, "sphere not visible: {:?}", center);
        let corner = buffers.color.get_pixel(0, 0);
        assert!(corner.0[0] < 0.1, "corner should be dark: {:?}", corner);
    }
}
