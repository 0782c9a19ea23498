// Copyright @yucwang 2021

use aurum::emitters::envmap::EnvMap;
use aurum::integrators::path::PathIntegrator;
use aurum::io::film::save_image;
use aurum::renderers::simple::{ Renderer, SimpleRenderer };
use aurum::scenes;

use std::env;
use std::sync::Arc;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <scene> <output> [--spp N] [--max-depth N] [--seed N] [--envmap PATH] [--width N] [--height N]", args[0]);
        eprintln!("Built-in scenes: diffuse, glass, metal");
        std::process::exit(1);
    }

    let scene_name = &args[1];
    let output_path = &args[2];
    let mut spp: u32 = 32;
    let mut max_depth: u32 = 8;
    let mut seed: u64 = 0;
    let mut envmap_path: Option<String> = None;
    let mut width: usize = 512;
    let mut height: usize = 384;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(spp);
            }
            "--max-depth" => {
                i += 1;
                max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(max_depth);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--envmap" => {
                i += 1;
                envmap_path = args.get(i).cloned();
            }
            "--width" => {
                i += 1;
                width = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(width);
            }
            "--height" => {
                i += 1;
                height = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(height);
            }
            _ => {}
        }
        i += 1;
    }

    let (mut scene, mut camera) = match scenes::build(scene_name, width, height) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = envmap_path {
        match EnvMap::from_file(&path) {
            Ok(env_map) => scene.set_environment(Arc::new(env_map)),
            // The render still makes sense against a black background.
            Err(e) => log::warn!("Failed to load environment map: {}", e),
        }
    }
    scene.build_bvh();

    log::info!("Rendering '{}' at {}x{}, {} spp, max depth {}.",
               scene_name, width, height, spp, max_depth);
    let integrator = Box::new(PathIntegrator::new(max_depth, spp));
    let renderer = SimpleRenderer::new(integrator, seed);
    let image = renderer.render(&scene, &mut camera);

    if let Err(e) = save_image(&image, output_path) {
        eprintln!("Failed to save {}: {}", output_path, e);
        std::process::exit(1);
    }
    log::info!("Wrote {}.", output_path);
}
