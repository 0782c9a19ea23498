// Copyright @yucwang 2021

use crate::core::scene::{ Scene, SceneObject };
use crate::materials::conductor::RoughConductor;
use crate::materials::dielectric::Dielectric;
use crate::materials::diffuse::Lambertian;
use crate::materials::emissive::Emissive;
use crate::materials::mirror::MirrorConductor;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::io::ior::IorTable;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::sphere::Sphere;
use std::sync::Arc;

/// Gold n/k samples (Johnson and Christy), wavelengths in micrometers.
const GOLD_IOR_CSV: &str = "\
wl,n
0.450,1.502
0.550,0.425
0.650,0.166
wl,k
0.450,1.878
0.550,2.462
0.650,3.150
";

fn ground() -> SceneObject {
    SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.0, -100.5, -1.0), 100.0)),
        Arc::new(Lambertian::new(RGBSpectrum::splat(0.5))))
}

fn overhead_light() -> SceneObject {
    SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.0, 4.0, -1.0), 1.0)),
        Arc::new(Emissive::new(RGBSpectrum::splat(12.0))))
}

/// Three Lambertian spheres under a bright sphere light.
fn diffuse_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(ground());
    scene.add_object(overhead_light());
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(-1.1, 0.0, -1.0), 0.5)),
        Arc::new(Lambertian::new(RGBSpectrum::new(0.8, 0.3, 0.3)))));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, -1.0), 0.5)),
        Arc::new(Lambertian::new(RGBSpectrum::new(0.3, 0.8, 0.3)))));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(1.1, 0.0, -1.0), 0.5)),
        Arc::new(Lambertian::new(RGBSpectrum::new(0.3, 0.3, 0.8)))));
    scene
}

/// A smooth glass ball next to a frosted one, over a diffuse ground.
fn glass_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(ground());
    scene.add_object(overhead_light());
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(-0.6, 0.0, -1.0), 0.5)),
        Arc::new(Dielectric::smooth(1.5))));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.6, 0.0, -1.0), 0.5)),
        Arc::new(Dielectric::new(1.5, 0.2, 0.0))));
    scene
}

/// Gold spheres of increasing roughness plus an ideal gold mirror.
fn metal_scene() -> std::result::Result<Scene, String> {
    let gold = IorTable::parse(GOLD_IOR_CSV)?;
    let (eta, k) = gold.to_rgb();

    let mut scene = Scene::new();
    scene.add_object(ground());
    scene.add_object(overhead_light());
    for (i, &roughness) in [0.05 as Float, 0.2, 0.5].iter().enumerate() {
        let x = -1.1 + 1.1 * i as Float;
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::new(x, 0.0, -1.0), 0.5)),
            Arc::new(RoughConductor::from_ior_table(&gold, roughness, 0.0))));
    }
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, -2.3), 0.5)),
        Arc::new(MirrorConductor::new(eta, k))));
    Ok(scene)
}

fn default_camera(width: usize, height: usize) -> PerspectiveCamera {
    let look_from = Vector3f::new(0.0, 0.8, 2.5);
    let look_at = Vector3f::new(0.0, 0.0, -1.0);
    let focus_dist = (look_at - look_from).norm();
    PerspectiveCamera::new(look_from, look_at,
                           Vector3f::new(0.0, 1.0, 0.0),
                           40.0, width as Float / height as Float,
                           0.0, focus_dist, width, height)
}

/// Builds one of the built-in demo scenes by name. The scene comes back
/// without an acceleration structure; callers add an environment light if
/// they have one and then build the BVH.
pub fn build(name: &str, width: usize, height: usize)
             -> std::result::Result<(Scene, PerspectiveCamera), String> {
    let scene = match name {
        "diffuse" => diffuse_scene(),
        "glass" => glass_scene(),
        "metal" => metal_scene()?,
        _ => return Err(format!("unknown scene '{}', expected one of: diffuse, glass, metal", name)),
    };
    Ok((scene, default_camera(width, height)))
}
