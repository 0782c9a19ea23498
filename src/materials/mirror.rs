// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::{ BSDFSample, LobeFlag, Material, TransportMode };
use crate::materials::fresnel::fresnel_conductor;
use crate::materials::microfacet::reflect_outward;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Perfect specular reflector with a flat (optionally tinted) reflectance.
pub struct Mirror {
    albedo: RGBSpectrum,
}

impl Mirror {
    pub fn new(albedo: RGBSpectrum) -> Self {
        Self { albedo }
    }
}

impl Material for Mirror {
    fn eval(&self, _its: &SurfaceIntersection, _wo: &Vector3f, _wi: &Vector3f,
            _mode: TransportMode) -> RGBSpectrum {
        RGBSpectrum::default()
    }

    fn sample(&self, its: &SurfaceIntersection, wo: &Vector3f,
              _u: &Vector2f, _u_lobe: Float,
              _mode: TransportMode) -> Option<BSDFSample> {
        let wi = reflect_outward(wo, &its.sh_normal());
        if its.geo_normal().dot(&wi) <= 0.0 {
            return None;
        }

        Some(BSDFSample {
            wi,
            // Cosine and delta normalization cancel; the throughput is the
            // reflectance itself.
            f: self.albedo,
            pdf: 1.0,
            flags: LobeFlag::SPECULAR | LobeFlag::REFLECTION,
        })
    }

    fn pdf(&self, _its: &SurfaceIntersection, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }

    fn is_specular(&self) -> bool {
        true
    }
}

/// Smooth conductor: deterministic mirror direction weighted by the exact
/// complex Fresnel reflectance per channel.
pub struct MirrorConductor {
    eta: RGBSpectrum,
    k: RGBSpectrum,
}

impl MirrorConductor {
    pub fn new(eta: RGBSpectrum, k: RGBSpectrum) -> Self {
        Self { eta, k }
    }
}

impl Material for MirrorConductor {
    fn eval(&self, _its: &SurfaceIntersection, _wo: &Vector3f, _wi: &Vector3f,
            _mode: TransportMode) -> RGBSpectrum {
        RGBSpectrum::default()
    }

    fn sample(&self, its: &SurfaceIntersection, wo: &Vector3f,
              _u: &Vector2f, _u_lobe: Float,
              _mode: TransportMode) -> Option<BSDFSample> {
        let wi = reflect_outward(wo, &its.sh_normal());
        let cos_theta = its.sh_normal().dot(&wi);
        if cos_theta <= 0.0 || its.geo_normal().dot(&wi) <= 0.0 {
            return None;
        }

        Some(BSDFSample {
            wi,
            f: fresnel_conductor(cos_theta, &self.eta, &self.k),
            pdf: 1.0,
            flags: LobeFlag::SPECULAR | LobeFlag::REFLECTION,
        })
    }

    fn pdf(&self, _its: &SurfaceIntersection, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }

    fn is_specular(&self) -> bool {
        true
    }
}
