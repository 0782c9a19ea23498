// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::core::material::TransportMode;
use crate::math::constants::{ Float, Vector2f };
use crate::math::ray::{ spawn_ray, Ray3f };
use crate::math::spectrum::RGBSpectrum;

const PDF_EPSILON: Float = 1e-8;

/// Balance between two sampling strategies with the power heuristic
/// (beta = 2).
pub fn power_heuristic(pdf_a: Float, pdf_b: Float) -> Float {
    let a2 = pdf_a * pdf_a;
    let b2 = pdf_b * pdf_b;
    if a2 + b2 <= 0.0 {
        return 0.0;
    }
    a2 / (a2 + b2)
}

/// Unidirectional path tracer with next-event estimation against the
/// environment light. Environment hits found by BSDF sampling and by direct
/// light sampling are combined with multiple importance sampling. Paths are
/// cut at a fixed depth instead of Russian roulette.
pub struct PathIntegrator {
    max_depth: u32,
    samples_per_pixel: u32,
}

impl PathIntegrator {
    pub fn new(max_depth: u32, samples_per_pixel: u32) -> Self {
        Self { max_depth, samples_per_pixel }
    }

    fn li(&self, scene: &Scene, ray: Ray3f, rng: &mut LcgRng) -> RGBSpectrum {
        let mut ray = ray;
        let mut radiance = RGBSpectrum::default();
        let mut beta = RGBSpectrum::splat(1.0);

        // Density of the bounce that produced the current ray, for weighing
        // environment hits against next-event estimation.
        let mut prev_pdf = 0.0;
        let mut prev_specular = false;
        let mut has_prev = false;

        for _depth in 0..self.max_depth {
            let its = match scene.ray_intersection(&ray) {
                Some(its) => its,
                None => {
                    let le = scene.environment_radiance(&ray.dir());
                    if !le.is_black() {
                        let weight = if !has_prev || prev_specular {
                            1.0
                        } else {
                            power_heuristic(prev_pdf, scene.pdf_environment(&ray.dir()))
                        };
                        radiance += beta * le * weight;
                    }
                    break;
                }
            };

            let material = match its.material() {
                Some(material) => material.clone(),
                None => break,
            };
            let wo = -ray.dir();

            radiance += beta * material.emitted(&its, &wo);

            // Next-event estimation toward the environment. Delta lobes
            // never evaluate, so skip the shadow ray entirely.
            if !material.is_specular() {
                let u_light = Vector2f::new(rng.next_f32(), rng.next_f32());
                if let Some((wi_light, le, pdf_light)) = scene.sample_environment(&u_light) {
                    if pdf_light > 0.0 && !le.is_black() {
                        let f = material.eval(&its, &wo, &wi_light, TransportMode::Radiance);
                        if !f.is_black() {
                            let shadow_ray = spawn_ray(its.p(), its.geo_normal(), wi_light);
                            if !scene.ray_intersection_t(&shadow_ray) {
                                let pdf_bsdf = material.pdf(&its, &wo, &wi_light);
                                let weight = power_heuristic(pdf_light, pdf_bsdf);
                                let cos_theta = wi_light.dot(&its.sh_normal()).abs();
                                radiance += beta * f * le
                                    * (cos_theta * weight / pdf_light);
                            }
                        }
                    }
                }
            }

            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let u_lobe = rng.next_f32();
            let bs = match material.sample(&its, &wo, &u, u_lobe, TransportMode::Radiance) {
                Some(bs) => bs,
                None => break,
            };

            if bs.is_specular() {
                beta *= bs.f;
            } else {
                if bs.pdf < PDF_EPSILON {
                    break;
                }
                let cos_theta = bs.wi.dot(&its.sh_normal()).abs();
                beta *= bs.f * (cos_theta / bs.pdf);
            }
            if beta.is_black() {
                break;
            }

            prev_pdf = bs.pdf;
            prev_specular = bs.is_specular();
            has_prev = true;
            ray = spawn_ray(its.p(), its.geo_normal(), bs.wi);
        }

        radiance
    }
}

impl Integrator for PathIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, sensor: &dyn Sensor,
                         pixel: Vector2f, rng: &mut LcgRng) -> RGBSpectrum {
        let width = sensor.bitmap().width() as Float;
        let height = sensor.bitmap().height() as Float;

        let u = Vector2f::new((pixel.x + rng.next_f32()) / width,
                              (pixel.y + rng.next_f32()) / height);
        let lens = Vector2f::new(rng.next_f32(), rng.next_f32());

        let ray = sensor.sample_ray(&u, &lens);
        self.li(scene, ray, rng)
    }

    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneObject;
    use crate::emitters::envmap::EnvMap;
    use crate::io::image_utils::LinearImage;
    use crate::materials::diffuse::Lambertian;
    use crate::materials::emissive::Emissive;
    use crate::math::constants::Vector3f;
    use crate::sensors::perspective::PerspectiveCamera;
    use crate::shapes::sphere::Sphere;
    use std::sync::Arc;

    fn test_camera() -> PerspectiveCamera {
        PerspectiveCamera::new(Vector3f::zeros(),
                               Vector3f::new(0.0, 0.0, -1.0),
                               Vector3f::new(0.0, 1.0, 0.0),
                               60.0, 1.0, 0.0, 1.0, 4, 4)
    }

    fn constant_environment(value: Float) -> Arc<EnvMap> {
        let pixels = vec![RGBSpectrum::splat(value); 8 * 4];
        Arc::new(EnvMap::new(LinearImage::from_pixels(8, 4, pixels).unwrap()))
    }

    #[test]
    fn test_power_heuristic() {
        assert!((power_heuristic(1.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((power_heuristic(1.0, 0.0) - 1.0).abs() < 1e-6);
        assert_eq!(power_heuristic(0.0, 0.0), 0.0);
        // Heavily favors the dominant strategy.
        assert!(power_heuristic(10.0, 1.0) > 0.99);
        let w = power_heuristic(2.0, 3.0) + power_heuristic(3.0, 2.0);
        assert!((w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_escaped_camera_ray_sees_environment() {
        let mut scene = Scene::new();
        scene.set_environment(constant_environment(1.5));
        scene.build_bvh();

        let camera = test_camera();
        let integrator = PathIntegrator::new(4, 1);
        let mut rng = LcgRng::new(17);

        let l = integrator.trace_ray_forward(&scene, &camera,
                                             Vector2f::new(1.0, 2.0), &mut rng);
        // No previous bounce, so the environment is taken at full weight.
        assert!((l[0] - 1.5).abs() < 1e-4, "l = {:?}", l);
        assert!((l[1] - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_dark_scene_stays_dark() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, -3.0), 1.0)),
            Arc::new(Lambertian::new(RGBSpectrum::splat(0.5)))));
        scene.build_bvh();

        let camera = test_camera();
        let integrator = PathIntegrator::new(8, 1);
        let mut rng = LcgRng::new(5);

        for i in 0..16 {
            let pixel = Vector2f::new((i % 4) as Float, (i / 4) as Float);
            let l = integrator.trace_ray_forward(&scene, &camera, pixel, &mut rng);
            assert!(l.is_black(), "pixel {:?} got {:?}", pixel, l);
        }
    }

    #[test]
    fn test_emissive_surface_is_seen_directly() {
        let radiance = RGBSpectrum::new(2.0, 3.0, 4.0);
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, -3.0), 1.0)),
            Arc::new(Emissive::new(radiance))));
        scene.build_bvh();

        let camera = test_camera();
        let integrator = PathIntegrator::new(4, 1);
        let mut rng = LcgRng::new(23);

        // The center pixel looks straight at the sphere.
        let l = integrator.trace_ray_forward(&scene, &camera,
                                             Vector2f::new(1.5, 1.5), &mut rng);
        assert!((l[0] - 2.0).abs() < 1e-5);
        assert!((l[1] - 3.0).abs() < 1e-5);
        assert!((l[2] - 4.0).abs() < 1e-5);
    }
}
