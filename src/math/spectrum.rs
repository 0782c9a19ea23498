// Copyright @yucwang 2021

use super::constants::{ Float, Vector3f };

use std::ops;

/// Linear RGB radiance/reflectance value. Stands in for a full spectral
/// representation; all channels are assumed to be in linear space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f,
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0, 0.0, 0.0) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn splat(v: Float) -> Self {
        Self { rgb: Vector3f::new(v, v, v) }
    }

    pub fn from_vector(v: Vector3f) -> Self {
        Self { rgb: v }
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }

    pub fn is_black(&self) -> bool {
        self.rgb[0] == 0.0 && self.rgb[1] == 0.0 && self.rgb[2] == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.rgb[0].is_finite() && self.rgb[1].is_finite() && self.rgb[2].is_finite()
    }

    // Rec.709 luminance weights.
    pub fn luminance(&self) -> Float {
        0.2126 * self.rgb[0] + 0.7152 * self.rgb[1] + 0.0722 * self.rgb[2]
    }

    pub fn max_component(&self) -> Float {
        self.rgb[0].max(self.rgb[1]).max(self.rgb[2])
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.rgb[index]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: Self) {
        self.rgb += rhs.rgb;
    }
}

impl ops::Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { rgb: self.rgb - rhs.rgb }
    }
}

// Component-wise product, used for throughput updates.
impl ops::Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl ops::MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, rhs: Self) {
        self.rgb = self.rgb.component_mul(&rhs.rgb);
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self {
        Self { rgb: self.rgb * rhs }
    }
}

impl ops::Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum { rgb: rhs.rgb * self }
    }
}

impl ops::Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, rhs: Float) -> Self {
        Self { rgb: self.rgb / rhs }
    }
}

impl ops::Div for RGBSpectrum {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self { rgb: self.rgb.component_div(&rhs.rgb) }
    }
}

/* Tests for RGBSpectrum */

#[cfg(test)]
mod tests {
    use super::RGBSpectrum;

    #[test]
    fn test_spectrum_arithmetic() {
        let a = RGBSpectrum::new(1.0, 2.0, 3.0);
        let b = RGBSpectrum::new(0.5, 0.5, 0.5);

        let sum = a + b;
        assert_eq!(sum, RGBSpectrum::new(1.5, 2.5, 3.5));

        let prod = a * b;
        assert_eq!(prod, RGBSpectrum::new(0.5, 1.0, 1.5));

        let scaled = a * 2.0;
        assert_eq!(scaled, RGBSpectrum::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, scaled);

        let div = a / 2.0;
        assert_eq!(div, RGBSpectrum::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_spectrum_predicates() {
        assert!(RGBSpectrum::default().is_black());
        assert!(!RGBSpectrum::new(0.0, 0.1, 0.0).is_black());
        assert!(RGBSpectrum::new(1.0, 1.0, 1.0).is_finite());
        assert!(!RGBSpectrum::new(std::f32::NAN, 0.0, 0.0).is_finite());
        assert!(!RGBSpectrum::new(0.0, std::f32::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_spectrum_luminance() {
        let white = RGBSpectrum::new(1.0, 1.0, 1.0);
        assert!((white.luminance() - 1.0).abs() < 1e-4);

        let green = RGBSpectrum::new(0.0, 1.0, 0.0);
        assert!((green.luminance() - 0.7152).abs() < 1e-6);
    }
}
