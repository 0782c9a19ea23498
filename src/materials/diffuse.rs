// Copyright @yucwang 2021

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::{ BSDFSample, LobeFlag, Material, TransportMode };
use crate::math::constants::{ Float, Vector2f, Vector3f, INV_PI };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::sample_cosine_hemisphere;

/// Ideal diffuse reflector, f = albedo / pi over the upper hemisphere.
pub struct Lambertian {
    albedo: RGBSpectrum,
}

impl Lambertian {
    pub fn new(albedo: RGBSpectrum) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn eval(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f,
            _mode: TransportMode) -> RGBSpectrum {
        if its.sh_normal().dot(wi) <= 0.0 || its.sh_normal().dot(wo) <= 0.0 {
            return RGBSpectrum::default();
        }
        if its.geo_normal().dot(wi) <= 0.0 {
            return RGBSpectrum::default();
        }

        self.albedo * INV_PI
    }

    fn sample(&self, its: &SurfaceIntersection, wo: &Vector3f,
              u: &Vector2f, _u_lobe: Float,
              _mode: TransportMode) -> Option<BSDFSample> {
        if its.sh_normal().dot(wo) <= 0.0 {
            return None;
        }

        // Cosine-weighted direction in the shading frame; the cosine factor
        // cancels against the density in the estimator.
        let frame = Frame::from_normal(&its.sh_normal());
        let local = sample_cosine_hemisphere(u);
        let wi = frame.from_local(&local);

        if its.geo_normal().dot(&wi) <= 0.0 {
            return None;
        }

        let pdf = local.z * INV_PI;
        if pdf <= 0.0 {
            return None;
        }

        Some(BSDFSample {
            wi,
            f: self.albedo * INV_PI,
            pdf,
            flags: LobeFlag::DIFFUSE | LobeFlag::REFLECTION,
        })
    }

    fn pdf(&self, its: &SurfaceIntersection, wo: &Vector3f, wi: &Vector3f) -> Float {
        if its.sh_normal().dot(wo) <= 0.0 {
            return 0.0;
        }
        let cos_theta = its.sh_normal().dot(wi);
        if cos_theta <= 0.0 {
            return 0.0;
        }
        cos_theta * INV_PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::math::constants::PI;
    use crate::math::warp::{ sample_uniform_hemisphere, sample_uniform_hemisphere_pdf };

    fn test_intersection() -> SurfaceIntersection {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        SurfaceIntersection::new(Vector3f::zeros(), n, n, Vector2f::new(0.0, 0.0), 1.0)
    }

    #[test]
    fn test_energy_conservation() {
        // Hemispherical integral of f * cos(theta) equals the albedo.
        let albedo = RGBSpectrum::new(0.7, 0.5, 0.2);
        let mat = Lambertian::new(albedo);
        let its = test_intersection();
        let wo = Vector3f::new(0.2, 0.3, 0.9).normalize();

        let mut rng = LcgRng::new(71);
        let n = 100_000;
        let mut sum = Vector3f::zeros();
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let wi = sample_uniform_hemisphere(&u);
            let f = mat.eval(&its, &wo, &wi, TransportMode::Radiance);
            sum += f.to_vector() * wi.z / sample_uniform_hemisphere_pdf();
        }
        let integral = sum / n as Float;
        for c in 0..3 {
            assert!((integral[c] - albedo[c]).abs() < 0.01,
                    "channel {}: {} vs {}", c, integral[c], albedo[c]);
        }
    }

    #[test]
    fn test_pdf_normalizes_and_matches_cosine() {
        let mat = Lambertian::new(RGBSpectrum::splat(0.5));
        let its = test_intersection();
        let wo = Vector3f::new(0.0, 0.0, 1.0);

        let mut rng = LcgRng::new(19);
        let n = 100_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let wi = sample_uniform_hemisphere(&u);
            sum += (mat.pdf(&its, &wo, &wi) / sample_uniform_hemisphere_pdf()) as f64;
        }
        assert!((sum / n as f64 - 1.0).abs() < 0.02);

        let wi = Vector3f::new(0.0, 0.6, 0.8);
        assert!((mat.pdf(&its, &wo, &wi) - 0.8 / PI).abs() < 1e-5);
    }

    #[test]
    fn test_below_surface_is_black() {
        let mat = Lambertian::new(RGBSpectrum::splat(0.5));
        let its = test_intersection();
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let below = Vector3f::new(0.0, 0.0, -1.0);

        assert!(mat.eval(&its, &wo, &below, TransportMode::Radiance).is_black());
        assert_eq!(mat.pdf(&its, &wo, &below), 0.0);

        // Sampling from the back side fails.
        let back = Vector3f::new(0.0, 0.0, -1.0);
        assert!(mat.sample(&its, &back, &Vector2f::new(0.3, 0.7), 0.0,
                           TransportMode::Radiance).is_none());
    }

    #[test]
    fn test_sample_reports_consistent_pdf() {
        let mat = Lambertian::new(RGBSpectrum::splat(0.8));
        let its = test_intersection();
        let wo = Vector3f::new(0.1, -0.2, 0.97).normalize();
        let mut rng = LcgRng::new(31);

        for _ in 0..2000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            if let Some(s) = mat.sample(&its, &wo, &u, 0.0, TransportMode::Radiance) {
                assert!(!s.is_specular());
                let pdf = mat.pdf(&its, &wo, &s.wi);
                assert!((pdf - s.pdf).abs() < 1e-4 * s.pdf.max(1.0));
            }
        }
    }
}
