mod executor;
mod output;
mod progress;
mod tile;
mod timer;

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use glam::Vec3;
use image::Rgb;

use lumen::{
    camera::Camera,
    denoise::{denoise, DenoiseParams},
    integrators::PathTracer,
    loader::ObjLoaderExt,
    material::{MaterialDescriptor, Principled},
    math::transform::Transform,
    renderer::World,
    scene::Scene,
};

use crate::{
    executor::Executor,
    output::{FileOutput, FinalOutput},
    timer::timed_scope_log,
};

/// Render an OBJ mesh to a PNG with a small CPU path tracer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of samples per pixel, higher is more costly
    #[arg(long, default_value_t = 100)]
    spp: u32,

    /// Image output width
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Image output height
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Keep the raw ray traced output instead of running the denoiser
    #[arg(long)]
    noise: bool,

    /// Path to the OBJ mesh to render
    #[arg(long = "path_obj", default_value = "content/dragon.obj")]
    path_obj: PathBuf,

    /// Output filename
    #[arg(long, default_value = "tmp.png")]
    out: PathBuf,

    /// Edge length of the tiles handed to render workers
    #[arg(long, default_value_t = 32)]
    tile_size: u32,
}

/// One mesh under a dome light, the camera slightly above the diagonal,
/// matching the values of the scene this tool was built to render.
fn build_scene(args: &Args) -> Result<Scene> {
    let mut scene = Scene::new();
    scene.set_dome_light_intensity(1.0);

    let material = scene.insert_material(MaterialDescriptor {
        label: Some("mesh".to_owned()),
        material: Box::new(Principled {
            base_color: Rgb([0.9, 0.12, 0.08]),
            roughness: 0.7,
            specular: 1.0,
            sheen: 1.0,
        }),
    });

    scene.load_obj(
        &args.path_obj,
        Transform::scaling(Vec3::splat(0.3)),
        material,
    )?;
    Ok(scene)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    ensure!(
        args.width > 0 && args.height > 0,
        "--width and --height must be positive"
    );
    ensure!(args.spp > 0, "--spp must be positive");
    ensure!(args.tile_size > 0, "--tile-size must be positive");

    log::info!("loading scene");
    let scene = build_scene(&args)?;

    let camera = Camera::look_at(
        args.width,
        args.height,
        f32::to_radians(45.),
        Vec3::splat(0.2),
        Vec3::ZERO,
        Vec3::Z,
        0.0,
    );

    let executor = Executor {
        width: args.width,
        height: args.height,
        tile_size: args.tile_size,
        samples_per_pixel: args.spp,
        camera,
        integrator: Box::new(PathTracer { max_depth: 64 }),
        world: World::from(scene),
    };

    let buffers = timed_scope_log("render", || executor.run()).res?;

    let color = if args.noise {
        buffers.color.clone()
    } else {
        log::info!("denoising");
        timed_scope_log("denoise", || denoise(&buffers, &DenoiseParams::default())).res
    };

    FileOutput {
        path: args.out.clone(),
    }
    .commit(&color)?;

    Ok(())
}
