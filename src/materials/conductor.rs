// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::{ BSDFSample, LobeFlag, Material, TransportMode };
use crate::io::ior::IorTable;
use crate::materials::fresnel::fresnel_conductor;
use crate::materials::microfacet::{ reflect_outward, roughness_to_alpha, GGXDistribution };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

/// Rough metal: Cook-Torrance BRDF with GGX visible-normal sampling and the
/// exact conductor Fresnel term, fr = D * G * F / (4 cos_i cos_o).
pub struct RoughConductor {
    eta: RGBSpectrum,
    k: RGBSpectrum,
    alpha_x: Float,
    alpha_y: Float,
}

impl RoughConductor {
    pub fn new(eta: RGBSpectrum, k: RGBSpectrum, roughness: Float, anisotropy: Float) -> Self {
        let aspect = (1.0 - anisotropy * 0.9).sqrt();
        Self {
            eta,
            k,
            alpha_x: roughness_to_alpha(roughness / aspect),
            alpha_y: roughness_to_alpha(roughness * aspect),
        }
    }

    /// Builds the conductor from measured spectral data, sampled at the
    /// nominal RGB primary wavelengths.
    pub fn from_ior_table(table: &IorTable, roughness: Float, anisotropy: Float) -> Self {
        let (eta, k) = table.to_rgb();
        Self::new(eta, k, roughness, anisotropy)
    }

    fn distribution(&self) -> GGXDistribution {
        GGXDistribution::new(self.alpha_x, self.alpha_y)
    }
}

impl Material for RoughConductor {
    fn eval(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f,
            _mode: TransportMode) -> RGBSpectrum {
        let cos_theta_o = its.sh_normal().dot(wo).abs();
        let cos_theta_i = its.sh_normal().dot(wi).abs();
        if cos_theta_o == 0.0 || cos_theta_i == 0.0 {
            return RGBSpectrum::default();
        }
        if its.geo_normal().dot(wi) <= 0.0 || its.geo_normal().dot(wo) <= 0.0 {
            return RGBSpectrum::default();
        }

        let wh = wo + wi;
        if wh.norm_squared() == 0.0 {
            return RGBSpectrum::default();
        }
        let wh = wh.normalize();

        let frame = Frame::from_normal(&its.sh_normal());
        let wo_local = frame.to_local(wo);
        let wi_local = frame.to_local(wi);
        let wh_local = frame.to_local(&wh);

        let dist = self.distribution();
        let d = dist.d(&wh_local);
        let g = dist.g(&wo_local, &wi_local);
        let f = fresnel_conductor(wh.dot(wi), &self.eta, &self.k);

        f * (d * g / (4.0 * cos_theta_i * cos_theta_o))
    }

    fn sample(&self, its: &SurfaceIntersection, wo: &Vector3f,
              u: &Vector2f, _u_lobe: Float,
              mode: TransportMode) -> Option<BSDFSample> {
        if its.geo_normal().dot(wo) <= 0.0 {
            return None;
        }

        let frame = Frame::from_normal(&its.sh_normal());
        let wo_local = frame.to_local(wo);
        if wo_local.z <= 0.0 {
            return None;
        }

        let dist = self.distribution();
        let wh_local = dist.sample_wh(&wo_local, u);
        let wh = frame.from_local(&wh_local);

        let wi = reflect_outward(wo, &wh);
        if its.geo_normal().dot(&wi) <= 0.0 {
            return None;
        }
        let wi_local = frame.to_local(&wi);
        if wi_local.z <= 0.0 {
            return None;
        }

        let dot_wo_wh = wo.dot(&wh);
        if dot_wo_wh <= 0.0 {
            return None;
        }

        // Half-vector to solid-angle Jacobian: dwh/dwi = 1 / (4 wo.wh).
        let pdf = dist.pdf(&wo_local, &wh_local) / (4.0 * dot_wo_wh);
        let f = self.eval(its, wo, &wi, mode);
        if pdf < 1e-8 || !f.is_finite() {
            return None;
        }

        Some(BSDFSample {
            wi,
            f,
            pdf,
            flags: LobeFlag::GLOSSY | LobeFlag::REFLECTION,
        })
    }

    fn pdf(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f) -> Float {
        if its.geo_normal().dot(wi) <= 0.0 || its.geo_normal().dot(wo) <= 0.0 {
            return 0.0;
        }

        let wh = wo + wi;
        if wh.norm_squared() == 0.0 {
            return 0.0;
        }
        let wh = wh.normalize();

        let frame = Frame::from_normal(&its.sh_normal());
        let wo_local = frame.to_local(wo);
        if wo_local.z == 0.0 {
            return 0.0;
        }
        let wh_local = frame.to_local(&wh);

        self.distribution().pdf(&wo_local, &wh_local) / (4.0 * wo.dot(&wh).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::materials::microfacet::reflect_outward;

    fn gold() -> (RGBSpectrum, RGBSpectrum) {
        (RGBSpectrum::new(0.143, 0.375, 1.442),
         RGBSpectrum::new(3.983, 2.386, 1.603))
    }

    fn test_intersection() -> SurfaceIntersection {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        SurfaceIntersection::new(Vector3f::zeros(), n, n, Vector2f::new(0.0, 0.0), 1.0)
    }

    #[test]
    fn test_sample_and_pdf_agree() {
        let (eta, k) = gold();
        let mat = RoughConductor::new(eta, k, 0.3, 0.0);
        let its = test_intersection();
        let wo = Vector3f::new(0.3, -0.1, 0.8).normalize();
        let mut rng = LcgRng::new(61);

        let mut accepted = 0;
        for _ in 0..5000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            if let Some(s) = mat.sample(&its, &wo, &u, 0.0, TransportMode::Radiance) {
                accepted += 1;
                assert!(!s.is_specular());
                assert!(s.pdf > 0.0);
                let pdf = mat.pdf(&its, &wo, &s.wi);
                assert!((pdf - s.pdf).abs() < 1e-3 * s.pdf.max(1.0),
                        "pdf mismatch: {} vs {}", pdf, s.pdf);
                let f = mat.eval(&its, &wo, &s.wi, TransportMode::Radiance);
                for c in 0..3 {
                    assert!((f[c] - s.f[c]).abs() < 1e-4 * s.f[c].max(1.0));
                }
            }
        }
        assert!(accepted > 4000, "only {} of 5000 samples accepted", accepted);
    }

    #[test]
    fn test_rejects_back_side() {
        let (eta, k) = gold();
        let mat = RoughConductor::new(eta, k, 0.2, 0.0);
        let its = test_intersection();
        let below = Vector3f::new(0.1, 0.1, -0.9).normalize();

        assert!(mat.sample(&its, &below, &Vector2f::new(0.5, 0.5), 0.0,
                           TransportMode::Radiance).is_none());
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        assert!(mat.eval(&its, &wo, &below, TransportMode::Radiance).is_black());
        assert_eq!(mat.pdf(&its, &wo, &below), 0.0);
    }

    #[test]
    fn test_roughness_widens_the_lobe() {
        // Second angular moment around the mirror direction grows with
        // roughness.
        let (eta, k) = gold();
        let its = test_intersection();
        let wo = Vector3f::new(0.4, 0.0, 0.9165151).normalize();
        let mirror = reflect_outward(&wo, &Vector3f::new(0.0, 0.0, 1.0));

        let mut moments = Vec::new();
        for &roughness in &[0.01, 0.1, 0.5] {
            let mat = RoughConductor::new(eta, k, roughness, 0.0);
            let mut rng = LcgRng::new(83);
            let mut sum = 0.0f64;
            let mut count = 0usize;
            for _ in 0..20_000 {
                let u = Vector2f::new(rng.next_f32(), rng.next_f32());
                if let Some(s) = mat.sample(&its, &wo, &u, 0.0, TransportMode::Radiance) {
                    let cos = s.wi.dot(&mirror).max(-1.0).min(1.0);
                    let angle = cos.acos() as f64;
                    sum += angle * angle;
                    count += 1;
                }
            }
            moments.push(sum / count as f64);
        }
        assert!(moments[0] < moments[1] && moments[1] < moments[2],
                "moments not increasing: {:?}", moments);
    }
}
