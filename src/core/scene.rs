// Copyright @yucwang 2021

use crate::core::bvh::BVH;
use crate::core::interaction::SurfaceIntersection;
use crate::core::material::Material;
use crate::core::shape::Shape;
use crate::emitters::envmap::EnvMap;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn Material>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn Material>) -> Self {
        Self { shape, material }
    }

    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }
}

pub struct Scene {
    objects: Vec<SceneObject>,
    environment: Option<Arc<EnvMap>>,
    scene_bounds: AABB,
    bvh: Option<BVH>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            environment: None,
            scene_bounds: AABB::default(),
            bvh: None,
        }
    }

    pub fn with_objects(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            environment: None,
            scene_bounds: AABB::default(),
            bvh: None,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
        self.bvh = None;
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn set_environment(&mut self, environment: Arc<EnvMap>) {
        self.environment = Some(environment);
    }

    pub fn environment(&self) -> Option<&Arc<EnvMap>> {
        self.environment.as_ref()
    }

    pub fn scene_bounds(&self) -> &AABB {
        &self.scene_bounds
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn build_bvh(&mut self) {
        let mut prim_bounds = Vec::with_capacity(self.objects.len());
        let mut prim_centroids = Vec::with_capacity(self.objects.len());
        let mut scene_bounds = AABB::default();
        for obj in &self.objects {
            let bounds = obj.shape.bounding_box();
            prim_centroids.push(bounds.center());
            prim_bounds.push(bounds);
            scene_bounds.expand_by_aabb(&bounds);
        }

        self.bvh = Some(BVH::new(prim_bounds, prim_centroids));
        self.scene_bounds = scene_bounds;
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let bvh = self.bvh.as_ref().expect("BVH must be built before ray_intersection");
        bvh.ray_intersection(ray, |prim_idx, ray| {
            self.objects[prim_idx].shape.ray_intersection(ray).map(|h| {
                let t = h.t();
                (h, t)
            })
        }).map(|(idx, hit)| hit.with_material(self.objects[idx].material.clone()))
    }

    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        let bvh = self.bvh.as_ref().expect("BVH must be built before ray_intersection_t");
        bvh.ray_intersection_t(ray, |prim_idx, ray| {
            self.objects[prim_idx].shape.ray_intersection_t(ray)
        })
    }

    /// Radiance arriving from infinity along `dir` (pointing away from the
    /// scene). Black when no environment light is attached.
    pub fn environment_radiance(&self, dir: &Vector3f) -> RGBSpectrum {
        match &self.environment {
            Some(env) => env.eval(dir),
            None => RGBSpectrum::default(),
        }
    }

    /// Importance-samples a direction toward the environment light. Returns
    /// the world-space direction, its radiance and its solid-angle density.
    pub fn sample_environment(&self, u: &Vector2f) -> Option<(Vector3f, RGBSpectrum, Float)> {
        self.environment.as_ref().and_then(|env| env.sample_direction(u))
    }

    /// Solid-angle density with which `sample_environment` produces `dir`.
    pub fn pdf_environment(&self, dir: &Vector3f) -> Float {
        match &self.environment {
            Some(env) => env.pdf_direction(dir),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material::{ BSDFSample, TransportMode };
    use crate::math::constants::Vector2f;

    struct TestShape {
        t: Float,
    }

    impl TestShape {
        fn new(t: Float) -> Self {
            Self { t }
        }
    }

    impl Shape for TestShape {
        fn bounding_box(&self) -> AABB {
            AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0))
        }

        fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
            if self.t < ray.min_t || self.t > ray.max_t {
                return None;
            }

            let p = ray.at(self.t);
            let n = Vector3f::new(0.0, 0.0, 1.0);
            let uv = Vector2f::new(0.0, 0.0);
            Some(SurfaceIntersection::new(p, n, n, uv, self.t))
        }

        fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
            self.t >= ray.min_t && self.t <= ray.max_t
        }
    }

    struct TestMaterial;

    impl Material for TestMaterial {
        fn eval(&self, _its: &SurfaceIntersection, _wo: &Vector3f, _wi: &Vector3f,
                _mode: TransportMode) -> RGBSpectrum {
            RGBSpectrum::default()
        }

        fn sample(&self, _its: &SurfaceIntersection, _wo: &Vector3f,
                  _u: &Vector2f, _u_lobe: Float,
                  _mode: TransportMode) -> Option<BSDFSample> {
            None
        }

        fn pdf(&self, _its: &SurfaceIntersection, _wo: &Vector3f, _wi: &Vector3f) -> Float {
            0.0
        }
    }

    #[test]
    fn test_scene_closest_hit_gets_material() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(5.0)), Arc::new(TestMaterial)));
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(2.0)), Arc::new(TestMaterial)));
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(10.0)), Arc::new(TestMaterial)));
        scene.build_bvh();

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let hit = scene.ray_intersection(&ray).expect("expected intersection");

        assert_eq!(hit.t(), 2.0);
        assert!(hit.material().is_some());
        assert!(scene.ray_intersection_t(&ray));

        // Interval that excludes every object.
        let short = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0),
                               None, Some(1.0));
        assert!(scene.ray_intersection(&short).is_none());
        assert!(!scene.ray_intersection_t(&short));
    }

    #[test]
    fn test_scene_without_environment_is_dark() {
        let mut scene = Scene::new();
        scene.build_bvh();
        let dir = Vector3f::new(0.0, 1.0, 0.0);
        assert!(scene.environment_radiance(&dir).is_black());
        assert_eq!(scene.pdf_environment(&dir), 0.0);
        assert!(scene.sample_environment(&Vector2f::new(0.5, 0.5)).is_none());
    }
}
