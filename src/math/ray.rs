// Copyright @yucwang 2021

use super::constants::{ Float, Vector3f, FLOAT_MAX, RAY_EPSILON };

#[derive(Debug, Clone)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float,
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX) }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Copy of this ray with a tightened far bound. The direction is already
    /// normalized, so no renormalization happens here.
    pub fn clipped(&self, max_t: Float) -> Self {
        Self { origin: self.origin, dir: self.dir, min_t: self.min_t, max_t }
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/// Spawn a secondary ray leaving a surface at `p`. The origin is offset along
/// the geometric normal into the hemisphere `dir` points into, so the new ray
/// cannot re-intersect the surface it just left.
pub fn spawn_ray(p: Vector3f, geo_normal: Vector3f, dir: Vector3f) -> Ray3f {
    let offset = if dir.dot(&geo_normal) >= 0.0 {
        geo_normal
    } else {
        -geo_normal
    };
    Ray3f::new(p + offset * RAY_EPSILON, dir, Some(RAY_EPSILON), None)
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::{ spawn_ray, Ray3f, Vector3f };

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(2.0, 0.0, 0.0);
        let ray = Ray3f::new(o, d, None, None);

        assert_eq!(ray.origin(), o);
        assert!((ray.dir().norm() - 1.0).abs() < 1e-6);

        let p = ray.at(3.0);
        assert!((p.x - 3.0).abs() < 1e-6);

        let clipped = ray.clipped(5.0);
        assert_eq!(clipped.max_t, 5.0);
        assert!(clipped.test_segment(5.0));
        assert!(!clipped.test_segment(5.1));
    }

    #[test]
    fn test_spawn_ray_offsets_into_direction_hemisphere() {
        let p = Vector3f::new(0.0, 0.0, 0.0);
        let n = Vector3f::new(0.0, 1.0, 0.0);

        let above = spawn_ray(p, n, Vector3f::new(0.0, 1.0, 0.0));
        assert!(above.origin().y > 0.0);

        let below = spawn_ray(p, n, Vector3f::new(0.0, -1.0, 0.0));
        assert!(below.origin().y < 0.0);
    }
}
