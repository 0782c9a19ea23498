// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::math::aabb::AABB;
use crate::math::ray::Ray3f;

pub trait Shape: Send + Sync {
    fn bounding_box(&self) -> AABB;
    /// Closest intersection within the ray's [min_t, max_t] interval, if any.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection>;
    /// Predicate form for shadow rays; skips the full hit record.
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool;
}
