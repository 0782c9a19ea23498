// Copyright @yucwang 2021

use crate::math::bitmap::Bitmap;
use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

pub trait Sensor: Sync {
    /// Generates a primary ray through the normalized image-plane position
    /// `u` in [0, 1]^2, with (0, 0) at the top-left pixel. `lens` drives the
    /// aperture sample for cameras with a finite aperture and is ignored by
    /// pinhole cameras.
    fn sample_ray(&self, u: &Vector2f, lens: &Vector2f) -> Ray3f;
    fn bitmap(&self) -> &Bitmap;
    fn bitmap_mut(&mut self) -> &mut Bitmap;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
