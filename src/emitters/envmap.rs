// Copyright @yucwang 2021

use crate::io::image_utils::LinearImage;
use crate::math::constants::{ Float, Vector2f, Vector3f, PI, TWO_PI };
use crate::math::distribution::Distribution2D;
use crate::math::spectrum::RGBSpectrum;

/// Infinite environment light backed by an equirectangular radiance map.
///
/// The map is parameterized with +y up: u spans azimuth with u = (phi + pi)
/// / 2pi and v spans polar angle with v = 1 - theta / pi, so v = 1 looks
/// straight up. Sampling importance-samples the luminance of the map
/// weighted by sin(theta) to undo the pole stretch of the parameterization.
pub struct EnvMap {
    image: LinearImage,
    distribution: Option<Distribution2D>,
    scale: Float,
}

fn direction_to_uv(dir: &Vector3f) -> Vector2f {
    let theta = dir.y.max(-1.0).min(1.0).acos();
    let phi = dir.z.atan2(dir.x);
    Vector2f::new((phi + PI) / TWO_PI, 1.0 - theta / PI)
}

fn uv_to_direction(uv: &Vector2f) -> Vector3f {
    let phi = uv.x * TWO_PI - PI;
    let theta = PI * (1.0 - uv.y);
    let sin_theta = theta.sin();
    Vector3f::new(sin_theta * phi.cos(), theta.cos(), sin_theta * phi.sin())
}

impl EnvMap {
    pub fn new(image: LinearImage) -> Self {
        let distribution = if image.is_valid() {
            let width = image.width();
            let height = image.height();
            let mut weights = Vec::with_capacity(width * height);
            for y in 0..height {
                // Rows are weighted by sin(theta) at the row center so that
                // the distribution matches solid-angle density.
                let sin_theta = (PI * (y as Float + 0.5) / height as Float).sin();
                for x in 0..width {
                    weights.push(image.at(x, y).luminance().max(0.0) * sin_theta);
                }
            }
            Some(Distribution2D::new(&weights, width, height))
        } else {
            None
        };

        Self { image, distribution, scale: 1.0 }
    }

    /// Uniform radiance multiplier. The importance distribution is scale
    /// invariant, so only the looked-up radiance changes.
    pub fn with_scale(mut self, scale: Float) -> Self {
        self.scale = scale;
        self
    }

    pub fn from_file(path: &str) -> std::result::Result<Self, String> {
        let image = LinearImage::from_file(path)?;
        log::info!("Loaded environment map {} ({}x{}).",
                   path, image.width(), image.height());
        Ok(Self::new(image))
    }

    /// Bilinear lookup at (u, v); u wraps around the azimuthal seam, v is
    /// clamped at the poles.
    fn bilinear(&self, uv: &Vector2f) -> RGBSpectrum {
        let width = self.image.width() as isize;
        let height = self.image.height() as isize;

        let x = uv.x * width as Float - 0.5;
        let y = (1.0 - uv.y) * height as Float - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let wrap_x = |xi: isize| -> usize {
            (((xi % width) + width) % width) as usize
        };
        let clamp_y = |yi: isize| -> usize {
            yi.max(0).min(height - 1) as usize
        };

        let x0i = wrap_x(x0 as isize);
        let x1i = wrap_x(x0 as isize + 1);
        let y0i = clamp_y(y0 as isize);
        let y1i = clamp_y(y0 as isize + 1);

        (self.image.at(x0i, y0i) * ((1.0 - fx) * (1.0 - fy))
            + self.image.at(x1i, y0i) * (fx * (1.0 - fy))
            + self.image.at(x0i, y1i) * ((1.0 - fx) * fy)
            + self.image.at(x1i, y1i) * (fx * fy)) * self.scale
    }

    /// Radiance arriving from infinity along `dir`.
    pub fn eval(&self, dir: &Vector3f) -> RGBSpectrum {
        if !self.image.is_valid() {
            return RGBSpectrum::default();
        }
        self.bilinear(&direction_to_uv(dir))
    }

    /// Importance-samples a world-space direction toward the map. Returns
    /// the direction, its radiance and the solid-angle density.
    pub fn sample_direction(&self, u: &Vector2f) -> Option<(Vector3f, RGBSpectrum, Float)> {
        let distribution = self.distribution.as_ref()?;

        // The distribution lives in image space, v grows downward.
        let (uv_img, pdf_uv) = distribution.sample_continuous(u);
        if pdf_uv <= 0.0 {
            return None;
        }

        let uv = Vector2f::new(uv_img.x, 1.0 - uv_img.y);
        let theta = PI * (1.0 - uv.y);
        let sin_theta = theta.sin();
        if sin_theta <= 0.0 {
            return None;
        }

        let dir = uv_to_direction(&uv);
        let radiance = self.bilinear(&uv);
        let pdf_w = pdf_uv / (2.0 * PI * PI * sin_theta);
        Some((dir, radiance, pdf_w))
    }

    /// Solid-angle density with which `sample_direction` produces `dir`.
    pub fn pdf_direction(&self, dir: &Vector3f) -> Float {
        let distribution = match &self.distribution {
            Some(distribution) => distribution,
            None => return 0.0,
        };

        let theta = dir.y.max(-1.0).min(1.0).acos();
        let sin_theta = theta.sin();
        if sin_theta <= 0.0 {
            return 0.0;
        }

        let uv = direction_to_uv(dir);
        let uv_img = Vector2f::new(uv.x, 1.0 - uv.y);
        distribution.pdf(&uv_img) / (2.0 * PI * PI * sin_theta)
    }
}
