// Copyright @yucwang 2021

use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_disk_concentric;

/// Thin-lens perspective camera. With a zero aperture it degenerates to the
/// ideal pinhole model; otherwise ray origins are jittered over the lens disk
/// and converge on the focus plane.
pub struct PerspectiveCamera {
    origin: Vector3f,
    lower_left_corner: Vector3f,
    horizontal: Vector3f,
    vertical: Vector3f,
    u: Vector3f,
    v: Vector3f,
    lens_radius: Float,
    bitmap: Bitmap,
}

impl PerspectiveCamera {
    pub fn new(look_from: Vector3f,
               look_at: Vector3f,
               v_up: Vector3f,
               vfov_degrees: Float,
               aspect: Float,
               aperture: Float,
               focus_dist: Float,
               width: usize,
               height: usize) -> Self {
        let half_height = (0.5 * vfov_degrees.to_radians()).tan();
        let half_width = aspect * half_height;

        let w = (look_from - look_at).normalize();
        let u = v_up.cross(&w).normalize();
        let v = w.cross(&u);

        let horizontal = u * (2.0 * half_width * focus_dist);
        let vertical = v * (2.0 * half_height * focus_dist);
        let lower_left_corner =
            look_from - horizontal * 0.5 - vertical * 0.5 - w * focus_dist;

        Self {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: 0.5 * aperture,
            bitmap: Bitmap::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.bitmap.width()
    }

    pub fn height(&self) -> usize {
        self.bitmap.height()
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, uv: &Vector2f, lens: &Vector2f) -> Ray3f {
        // Image rows grow downward, the film plane grows upward.
        let s = uv.x;
        let t = 1.0 - uv.y;

        let rd = sample_uniform_disk_concentric(lens) * self.lens_radius;
        let offset = self.u * rd.x + self.v * rd.y;

        let origin = self.origin + offset;
        let dir = self.lower_left_corner + self.horizontal * s + self.vertical * t
            - origin;
        Ray3f::new(origin, dir, None, None)
    }

    fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    fn describe(&self) -> String {
        String::from("PerspectiveCamera\n  origin: Vector3f\n  lower_left_corner: Vector3f\n  horizontal: Vector3f\n  vertical: Vector3f\n  lens_radius: Float")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinhole() -> PerspectiveCamera {
        PerspectiveCamera::new(Vector3f::zeros(),
                               Vector3f::new(0.0, 0.0, -1.0),
                               Vector3f::new(0.0, 1.0, 0.0),
                               90.0, 1.0, 0.0, 1.0, 8, 8)
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = pinhole();
        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5), &Vector2f::new(0.5, 0.5));
        let dir = ray.dir();
        assert!(dir.x.abs() < 1e-6);
        assert!(dir.y.abs() < 1e-6);
        assert!((dir.z + 1.0).abs() < 1e-6);
        assert_eq!(ray.origin(), Vector3f::zeros());
    }

    #[test]
    fn test_image_top_maps_upward() {
        let cam = pinhole();
        let top = cam.sample_ray(&Vector2f::new(0.5, 0.0), &Vector2f::new(0.5, 0.5));
        let bottom = cam.sample_ray(&Vector2f::new(0.5, 1.0), &Vector2f::new(0.5, 0.5));
        assert!(top.dir().y > 0.0);
        assert!(bottom.dir().y < 0.0);
    }

    #[test]
    fn test_lens_samples_converge_on_focus_plane() {
        let focus_dist = 3.0;
        let cam = PerspectiveCamera::new(Vector3f::zeros(),
                                         Vector3f::new(0.0, 0.0, -1.0),
                                         Vector3f::new(0.0, 1.0, 0.0),
                                         60.0, 1.0, 0.5, focus_dist, 8, 8);

        let uv = Vector2f::new(0.3, 0.7);
        let a = cam.sample_ray(&uv, &Vector2f::new(0.1, 0.9));
        let b = cam.sample_ray(&uv, &Vector2f::new(0.8, 0.2));

        // Both rays pass through the same point on the focus plane.
        let ta = -focus_dist / a.dir().z;
        let tb = -focus_dist / b.dir().z;
        let pa = a.at(ta);
        let pb = b.at(tb);
        assert!((pa - pb).norm() < 1e-4, "{:?} vs {:?}", pa, pb);

        // A nonzero aperture jitters the ray origin.
        assert!((a.origin() - b.origin()).norm() > 1e-4);
    }
}
