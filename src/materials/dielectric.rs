// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::{ BSDFSample, LobeFlag, Material, TransportMode };
use crate::materials::fresnel::fresnel_dielectric;
use crate::materials::microfacet::{
    reflect_outward, refract_outward, roughness_to_alpha, GGXDistribution, SMOOTH_THRESHOLD,
};
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

/// Dielectric interface (glass, water). Smooth surfaces use delta
/// reflection/transmission selected by the Fresnel term; rough surfaces use
/// the Walter et al. microfacet transmission model over GGX.
///
/// Which side is "entering" follows the sign of cos(theta_o) against the
/// shading normal, so shapes must report true outward normals.
pub struct Dielectric {
    ior: Float,
    alpha_x: Float,
    alpha_y: Float,
}

impl Dielectric {
    pub fn new(ior: Float, roughness: Float, anisotropy: Float) -> Self {
        let aspect = (1.0 - anisotropy * 0.9).sqrt();
        Self {
            ior,
            alpha_x: roughness_to_alpha(roughness / aspect),
            alpha_y: roughness_to_alpha(roughness * aspect),
        }
    }

    pub fn smooth(ior: Float) -> Self {
        Self { ior, alpha_x: 0.0, alpha_y: 0.0 }
    }

    fn is_smooth(&self) -> bool {
        self.alpha_x < SMOOTH_THRESHOLD && self.alpha_y < SMOOTH_THRESHOLD
    }

    fn distribution(&self) -> GGXDistribution {
        GGXDistribution::new(self.alpha_x, self.alpha_y)
    }

    /// Fresnel reflectance with the incident medium taken from wo's side of
    /// the interface. Exiting rays past the critical angle return 1.
    fn fresnel(&self, cos_theta: Float, entering: bool) -> Float {
        if entering {
            fresnel_dielectric(cos_theta, 1.0, self.ior)
        } else {
            fresnel_dielectric(cos_theta, self.ior, 1.0)
        }
    }

    /// Reconstructs the half-vector for a (wo, wi) pair, oriented toward wo.
    /// Transmission folds the relative IOR into the sum.
    fn half_vector(&self, wo: &Vector3f, wi: &Vector3f,
                   is_reflection: bool, etap: Float) -> Option<Vector3f> {
        let wh = if is_reflection { wo + wi } else { wo + wi * etap };
        if wh.norm_squared() == 0.0 {
            return None;
        }
        let mut wh = wh.normalize();
        if wh.dot(wo) < 0.0 {
            wh = -wh;
        }
        Some(wh)
    }
}

impl Material for Dielectric {
    fn eval(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f,
            mode: TransportMode) -> RGBSpectrum {
        if self.is_smooth() {
            return RGBSpectrum::default();
        }

        let n = its.sh_normal();
        let cos_theta_o = n.dot(wo);
        let cos_theta_i = n.dot(wi);
        let is_reflection = cos_theta_o * cos_theta_i > 0.0;

        // Reflection stays on one geometric side of the interface, either
        // side; transmission legitimately crosses it.
        if is_reflection
            && its.geo_normal().dot(wo) * its.geo_normal().dot(wi) <= 0.0 {
            return RGBSpectrum::default();
        }

        let entering = cos_theta_o > 0.0;
        let etap = if entering { self.ior } else { 1.0 / self.ior };

        let wh = match self.half_vector(wo, wi, is_reflection, etap) {
            Some(wh) => wh,
            None => return RGBSpectrum::default(),
        };

        let frame = Frame::from_normal(&n);
        let wo_local = frame.to_local(wo);
        let wi_local = frame.to_local(wi);
        let wh_local = frame.to_local(&wh);

        let dist = self.distribution();
        let d = dist.d(&wh_local);
        let g = dist.g(&wo_local, &wi_local);
        let f = self.fresnel(wo.dot(&wh).abs(), entering);

        if is_reflection {
            let denom = (4.0 * cos_theta_i * cos_theta_o).abs();
            if denom < 1e-8 {
                return RGBSpectrum::default();
            }
            RGBSpectrum::splat(d * g * f / denom)
        } else {
            let dot_wi_wh = wi.dot(&wh);
            let dot_wo_wh = wo.dot(&wh);
            let sqrt_denom = dot_wi_wh * etap + dot_wo_wh;
            let denom = sqrt_denom * sqrt_denom * cos_theta_i * cos_theta_o;
            if denom.abs() < 1e-8 {
                return RGBSpectrum::default();
            }

            let mut val = d * g * (1.0 - f) * (dot_wi_wh * dot_wo_wh / denom).abs();
            if mode == TransportMode::Radiance {
                // Radiance compresses by etap^2 across the interface.
                val /= etap * etap;
            }
            RGBSpectrum::splat(val)
        }
    }

    fn sample(&self, its: &SurfaceIntersection, wo: &Vector3f,
              u: &Vector2f, u_lobe: Float,
              mode: TransportMode) -> Option<BSDFSample> {
        let n = its.sh_normal();
        let cos_theta_o = n.dot(wo);
        let entering = cos_theta_o > 0.0;

        let eta = if entering { 1.0 / self.ior } else { self.ior };
        let etap = if entering { self.ior } else { 1.0 / self.ior };
        let n_eff = if entering { n } else { -n };

        if self.is_smooth() {
            let f = self.fresnel(cos_theta_o.abs(), entering);
            if u_lobe < f {
                let wi = reflect_outward(wo, &n_eff);
                if its.geo_normal().dot(wo) * its.geo_normal().dot(&wi) <= 0.0 {
                    return None;
                }
                return Some(BSDFSample {
                    wi,
                    // The Fresnel weight cancels against the selection
                    // probability.
                    f: RGBSpectrum::splat(1.0),
                    pdf: f,
                    flags: LobeFlag::SPECULAR | LobeFlag::REFLECTION,
                });
            }

            let wi = refract_outward(wo, &n_eff, eta)?;
            let mut ft = 1.0;
            if mode == TransportMode::Radiance {
                ft /= etap * etap;
            }
            return Some(BSDFSample {
                wi,
                f: RGBSpectrum::splat(ft),
                pdf: 1.0 - f,
                flags: LobeFlag::SPECULAR | LobeFlag::TRANSMISSION,
            });
        }

        let frame = Frame::from_normal(&n);
        let wo_local = frame.to_local(wo);
        let dist = self.distribution();

        let wo_sampling = if wo_local.z < 0.0 { -wo_local } else { wo_local };
        let wh_local = dist.sample_wh(&wo_sampling, u);
        let mut wh = frame.from_local(&wh_local);
        if wh.dot(wo) < 0.0 {
            wh = -wh;
        }

        let dot_wo_wh = wo.dot(&wh);
        if dot_wo_wh == 0.0 {
            return None;
        }
        let f = self.fresnel(dot_wo_wh.abs(), entering);

        let sample = if u_lobe < f {
            let wi = reflect_outward(wo, &wh);
            // Same-side test against the geometric normal; the interior
            // side reflects too.
            if its.geo_normal().dot(wo) * its.geo_normal().dot(&wi) <= 0.0 {
                return None;
            }

            let pdf_wh = dist.pdf(&wo_sampling, &wh_local);
            BSDFSample {
                wi,
                f: self.eval(its, wo, &wi, mode),
                pdf: pdf_wh / (4.0 * dot_wo_wh.abs()) * f,
                flags: LobeFlag::GLOSSY | LobeFlag::REFLECTION,
            }
        } else {
            let wi = refract_outward(wo, &wh, eta)?;
            // Transmission must land on the far side of the shading normal.
            if n.dot(&wi) * cos_theta_o > 0.0 {
                return None;
            }

            let dot_wi_wh = wi.dot(&wh);
            let sqrt_denom = dot_wi_wh * etap + dot_wo_wh;
            if sqrt_denom == 0.0 {
                return None;
            }
            let dwh_dwi = dot_wi_wh.abs() * etap * etap / (sqrt_denom * sqrt_denom);
            let pdf_wh = dist.pdf(&wo_sampling, &wh_local);
            BSDFSample {
                wi,
                f: self.eval(its, wo, &wi, mode),
                pdf: pdf_wh * dwh_dwi * (1.0 - f),
                flags: LobeFlag::GLOSSY | LobeFlag::TRANSMISSION,
            }
        };

        if sample.pdf < 1e-8 || !sample.f.is_finite() {
            return None;
        }
        Some(sample)
    }

    fn pdf(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f) -> Float {
        if self.is_smooth() {
            return 0.0;
        }

        let n = its.sh_normal();
        let cos_theta_o = n.dot(wo);
        let cos_theta_i = n.dot(wi);
        let is_reflection = cos_theta_o * cos_theta_i > 0.0;

        // Mirrors the rejection in sample and eval so that densities are
        // only reported for producible pairs.
        if is_reflection
            && its.geo_normal().dot(wo) * its.geo_normal().dot(wi) <= 0.0 {
            return 0.0;
        }

        let entering = cos_theta_o > 0.0;
        let etap = if entering { self.ior } else { 1.0 / self.ior };

        let wh = match self.half_vector(wo, wi, is_reflection, etap) {
            Some(wh) => wh,
            None => return 0.0,
        };

        let dot_wo_wh = wo.dot(&wh);
        if dot_wo_wh == 0.0 {
            return 0.0;
        }
        let f = self.fresnel(dot_wo_wh.abs(), entering);

        let frame = Frame::from_normal(&n);
        let mut wo_local = frame.to_local(wo);
        if wo_local.z < 0.0 {
            wo_local = -wo_local;
        }
        let pdf_wh = self.distribution().pdf(&wo_local, &frame.to_local(&wh));

        if is_reflection {
            pdf_wh / (4.0 * dot_wo_wh.abs()) * f
        } else {
            let dot_wi_wh = wi.dot(&wh);
            let sqrt_denom = dot_wi_wh * etap + dot_wo_wh;
            if sqrt_denom == 0.0 {
                return 0.0;
            }
            let dwh_dwi = dot_wi_wh.abs() * etap * etap / (sqrt_denom * sqrt_denom);
            pdf_wh * dwh_dwi * (1.0 - f)
        }
    }

    fn is_specular(&self) -> bool {
        self.is_smooth()
    }
}
