// Copyright @yucwang 2021

use super::constants::{ Float, Vector3f, FLOAT_MAX, FLOAT_MIN };
use super::ray::Ray3f;

/// Axis-aligned bounding box. The default box is the empty set
/// (min = +inf, max = -inf) so that union with any box yields that box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f,
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector3f::new(FLOAT_MAX, FLOAT_MAX, FLOAT_MAX),
               p_max: Vector3f::new(FLOAT_MIN, FLOAT_MIN, FLOAT_MIN) }
    }
}

impl AABB {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        let mut min = Vector3f::new(0.0, 0.0, 0.0);
        let mut max = Vector3f::new(0.0, 0.0, 0.0);
        for idx in 0..3 {
            min[idx] = p_min[idx].min(p_max[idx]);
            max[idx] = p_max[idx].max(p_min[idx]);
        }
        Self { p_min: min, p_max: max }
    }

    pub fn center(&self) -> Vector3f {
        0.5 * self.p_min + 0.5 * self.p_max
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        for idx in 0..3 {
            self.p_min[idx] = self.p_min[idx].min(p[idx]);
            self.p_max[idx] = self.p_max[idx].max(p[idx]);
        }
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        for idx in 0..3 {
            self.p_min[idx] = self.p_min[idx].min(other.p_min[idx]);
            self.p_max[idx] = self.p_max[idx].max(other.p_max[idx]);
        }
    }

    pub fn unite(a: &AABB, b: &AABB) -> AABB {
        let mut out = *a;
        out.expand_by_aabb(b);
        out
    }

    /// Slab test over the ray's [min_t, max_t] interval. Directions that are
    /// (numerically) parallel to an axis fall back to a containment test on
    /// that axis instead of dividing by a near-zero component.
    pub fn ray_intersect(&self, ray: &Ray3f) -> bool {
        if !self.is_valid() {
            return false;
        }

        let o = ray.origin();
        let d = ray.dir();
        let mut t_min = ray.min_t;
        let mut t_max = ray.max_t;

        for idx in 0..3 {
            let dir = d[idx];
            if dir.abs() < 1e-8 {
                if o[idx] < self.p_min[idx] || o[idx] > self.p_max[idx] {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (self.p_min[idx] - o[idx]) * inv;
            let mut t1 = (self.p_max[idx] - o[idx]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return false;
            }
        }

        true
    }

    pub fn surface_area(&self) -> Float {
        let a = self.p_max[0] - self.p_min[0];
        let b = self.p_max[1] - self.p_min[1];
        let c = self.p_max[2] - self.p_min[2];

        2.0 * (a * b + a * c + b * c)
    }

    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Axis with the greatest extent; ties resolve toward x < y < z.
    pub fn max_extent(&self) -> usize {
        let d = self.diagonal();
        if d[0] >= d[1] && d[0] >= d[2] {
            0
        } else if d[1] >= d[2] {
            1
        } else {
            2
        }
    }

    pub fn is_valid(&self) -> bool {
        for idx in 0..3 {
            if self.p_min[idx] > self.p_max[idx] {
                return false;
            }
        }
        true
    }
}

/* Tests for AABB */

#[cfg(test)]
mod tests {
    use super::AABB;
    use super::Ray3f;
    use super::Vector3f;

    #[test]
    fn test_aabb_geometry() {
        let min = Vector3f::new(1.0, 7.0, 3.0);
        let max = Vector3f::new(4.0, 4.0, 4.0);
        let mut bbox = AABB::new(min, max);

        // Corners are re-sorted per axis by the constructor.
        assert_eq!(bbox.p_min, Vector3f::new(1.0, 4.0, 3.0));
        assert_eq!(bbox.p_max, Vector3f::new(4.0, 7.0, 4.0));

        let center = bbox.center();
        assert!((center[0] - 2.5).abs() < 1e-6);
        assert!((center[1] - 5.5).abs() < 1e-6);
        assert!((center[2] - 3.5).abs() < 1e-6);

        bbox.expand_by_point(&Vector3f::new(-1.0, 5.0, 6.0));
        assert!((bbox.p_min[0] + 1.0).abs() < 1e-6);
        assert!((bbox.p_max[2] - 6.0).abs() < 1e-6);
        assert_eq!(bbox.max_extent(), 0);
    }

    #[test]
    fn test_aabb_unite_contains_both() {
        let a = AABB::new(Vector3f::new(-1.0, -1.0, -1.0), Vector3f::new(0.0, 0.0, 0.0));
        let b = AABB::new(Vector3f::new(2.0, 3.0, 4.0), Vector3f::new(5.0, 6.0, 7.0));
        let u = AABB::unite(&a, &b);

        for idx in 0..3 {
            assert!(u.p_min[idx] <= a.p_min[idx] && u.p_min[idx] <= b.p_min[idx]);
            assert!(u.p_max[idx] >= a.p_max[idx] && u.p_max[idx] >= b.p_max[idx]);
        }

        // Union with the empty default box is the identity.
        let empty = AABB::default();
        assert_eq!(AABB::unite(&empty, &a), a);
    }

    #[test]
    fn test_aabb_ray_intersect() {
        let bbox = AABB::new(Vector3f::new(-1.0, -1.0, -1.0),
                             Vector3f::new(1.0, 1.0, 1.0));

        // Origin inside with min_t = 0 always hits.
        let inside = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0),
                                Vector3f::new(0.3, 0.5, -0.8), Some(0.0), None);
        assert!(bbox.ray_intersect(&inside));

        // Hit from outside.
        let toward = Ray3f::new(Vector3f::new(-5.0, 0.0, 0.0),
                                Vector3f::new(1.0, 0.0, 0.0), Some(0.0), None);
        assert!(bbox.ray_intersect(&toward));

        // Interval too short to reach the box.
        let short = Ray3f::new(Vector3f::new(-5.0, 0.0, 0.0),
                               Vector3f::new(1.0, 0.0, 0.0), Some(0.0), Some(1.0));
        assert!(!bbox.ray_intersect(&short));

        // Axis-parallel ray whose origin lies outside the slab on that axis.
        let parallel = Ray3f::new(Vector3f::new(-5.0, 2.0, 0.0),
                                  Vector3f::new(1.0, 0.0, 0.0), Some(0.0), None);
        assert!(!bbox.ray_intersect(&parallel));

        // Degenerate (empty) box never intersects.
        let empty = AABB::default();
        assert!(!empty.ray_intersect(&inside));
    }
}
