// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f, Vector3f, PI, TWO_PI };
use crate::math::ray::Ray3f;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Nearest quadratic root inside the ray's interval; falls back to the
    /// far root so rays starting inside the sphere still hit its back wall.
    fn hit_t(&self, ray: &Ray3f) -> Option<Float> {
        let oc = ray.origin() - self.center;
        let half_b = oc.dot(&ray.dir());
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        let mut root = -half_b - sqrt_d;
        if !ray.test_segment(root) {
            root = -half_b + sqrt_d;
            if !ray.test_segment(root) {
                return None;
            }
        }
        Some(root)
    }

    fn uv_at(n: &Vector3f) -> Vector2f {
        let phi = n.z.atan2(n.x);
        let theta = n.y.max(-1.0).min(1.0).asin();
        Vector2f::new(1.0 - (phi + PI) / TWO_PI, (theta + PI / 2.0) / PI)
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.hit_t(ray)?;
        let p = ray.at(t);
        // True outward normal, never flipped toward the ray. Materials use
        // its orientation to decide which side of the interface they see.
        let n = (p - self.center) / self.radius;
        Some(SurfaceIntersection::new(p, n, n, Self::uv_at(&n), t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.hit_t(ray).is_some()
    }
}
