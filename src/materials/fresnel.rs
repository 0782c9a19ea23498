// Copyright @yucwang 2021

use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Unpolarized Fresnel reflectance at a dielectric interface. `cos_theta_i`
/// is the cosine on the incident side (clamped to [0, 1]); returns 1 under
/// total internal reflection.
pub fn fresnel_dielectric(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let cos_theta_i = cos_theta_i.max(0.0).min(1.0);

    let sin_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0).sqrt();
    let sin_theta_t = (eta_i / eta_t) * sin_theta_i;
    if sin_theta_t >= 1.0 {
        return 1.0;
    }
    let cos_theta_t = (1.0 - sin_theta_t * sin_theta_t).max(0.0).sqrt();

    let r_parl = (eta_t * cos_theta_i - eta_i * cos_theta_t)
               / (eta_t * cos_theta_i + eta_i * cos_theta_t);
    let r_perp = (eta_i * cos_theta_i - eta_t * cos_theta_t)
               / (eta_i * cos_theta_i + eta_t * cos_theta_t);

    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

/// Per-channel Fresnel reflectance for a conductor with complex refractive
/// index eta + i*k, using the real-arithmetic a^2 + b^2 form rather than
/// Schlick's approximation.
pub fn fresnel_conductor(cos_theta_i: Float, eta: &RGBSpectrum, k: &RGBSpectrum) -> RGBSpectrum {
    let cos_theta_i = cos_theta_i.max(0.0).min(1.0);
    let cos2 = cos_theta_i * cos_theta_i;
    let sin2 = 1.0 - cos2;

    let eta = eta.to_vector();
    let k = k.to_vector();
    let eta2 = eta.component_mul(&eta);
    let k2 = k.component_mul(&k);

    let mut rs = Vector3f::zeros();
    let mut rp = Vector3f::zeros();
    for c in 0..3 {
        // t0 = eta^2 - k^2 - sin^2(theta), a^2 + b^2 = sqrt(t0^2 + 4 eta^2 k^2)
        let t0 = eta2[c] - k2[c] - sin2;
        let a2_plus_b2 = (t0 * t0 + 4.0 * eta2[c] * k2[c]).max(0.0).sqrt();

        let t1 = a2_plus_b2 + cos2;
        let a = (0.5 * (a2_plus_b2 + t0)).max(0.0).sqrt();
        let t2 = 2.0 * cos_theta_i * a;
        rs[c] = (t1 - t2) / (t1 + t2);

        let t3 = cos2 * a2_plus_b2 + sin2 * sin2;
        let t4 = t2 * sin2;
        rp[c] = rs[c] * (t3 - t4) / (t3 + t4);
    }

    RGBSpectrum::from_vector(0.5 * (rs + rp))
}
