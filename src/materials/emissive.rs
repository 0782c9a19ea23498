// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::{ BSDFSample, Material, TransportMode };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// One-sided area-light material. Absorbs everything it receives and emits
/// `radiance` toward directions on the front side of the shading normal.
pub struct Emissive {
    radiance: RGBSpectrum,
}

impl Emissive {
    pub fn new(radiance: RGBSpectrum) -> Self {
        Self { radiance }
    }
}

impl Material for Emissive {
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

    fn emitted(&self, its: &SurfaceIntersection, wo: &Vector3f) -> RGBSpectrum {
        if its.sh_normal().dot(wo) > 0.0 {
            self.radiance
        } else {
            RGBSpectrum::default()
        }
    }
}
