// Copyright @yucwang 2021

use crate::math::constants::{ Float, Vector2f, Vector3f, PI, TWO_PI };

pub const ALPHA_FLOOR: Float = 1e-4;
/// Below this width on both axes a lobe degenerates into a delta and the
/// rough machinery must not be used.
pub const SMOOTH_THRESHOLD: Float = 1e-3;

/// Perceptually linear roughness-to-alpha mapping.
pub fn roughness_to_alpha(roughness: Float) -> Float {
    let r = roughness.max(1e-3).min(1.0);
    r * r
}

/// Mirror `wo` (pointing away from the surface) about `n`. The result also
/// points away from the surface.
pub fn reflect_outward(wo: &Vector3f, n: &Vector3f) -> Vector3f {
    2.0 * wo.dot(n) * n - wo
}

/// Refract `wo` (pointing away from the surface, same side as `n`) through
/// the interface with relative IOR `eta = eta_i / eta_t`. Returns `None`
/// under total internal reflection; the result points into the far side.
pub fn refract_outward(wo: &Vector3f, n: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wo.dot(n);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).max(0.0).sqrt();
    Some(-eta * wo + (eta * cos_i - cos_t) * n)
}

/// Anisotropic GGX (Trowbridge-Reitz) microfacet distribution. All
/// directions are in the local shading frame with the macroscopic normal at
/// +Z. Sampling follows the visible-normal method of Heitz (2018).
pub struct GGXDistribution {
    alpha_x: Float,
    alpha_y: Float,
}

impl GGXDistribution {
    pub fn new(alpha_x: Float, alpha_y: Float) -> Self {
        Self {
            alpha_x: alpha_x.max(ALPHA_FLOOR),
            alpha_y: alpha_y.max(ALPHA_FLOOR),
        }
    }

    /// Normal distribution function at micro-normal `wh`. Zero at and above
    /// the horizon.
    pub fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = (wh.x * wh.x + wh.y * wh.y) / (wh.z * wh.z);
        if !tan2_theta.is_finite() {
            return 0.0;
        }

        let e = (wh.x * wh.x) / (self.alpha_x * self.alpha_x)
              + (wh.y * wh.y) / (self.alpha_y * self.alpha_y)
              + wh.z * wh.z;

        1.0 / (PI * self.alpha_x * self.alpha_y * e * e)
    }

    /// Smith auxiliary function: masked microfacet area per unit visible
    /// area for direction `w`, using the effective alpha along w's azimuth.
    pub fn lambda(&self, w: &Vector3f) -> Float {
        let xy2 = w.x * w.x + w.y * w.y;
        if xy2 == 0.0 {
            return 0.0;
        }
        let abs_tan2_theta = xy2 / (w.z * w.z);
        if !abs_tan2_theta.is_finite() {
            return 0.0;
        }

        let alpha2 = (w.x * w.x * self.alpha_x * self.alpha_x
                    + w.y * w.y * self.alpha_y * self.alpha_y) / xy2;

        0.5 * ((1.0 + alpha2 * abs_tan2_theta).sqrt() - 1.0)
    }

    pub fn g1(&self, w: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(w))
    }

    /// Smith joint shadowing-masking.
    pub fn g(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(wo) + self.lambda(wi))
    }

    /// Draws a micro-normal from the distribution of normals visible from
    /// `wo` (wo.z > 0). Samples always lie in the visible hemisphere, with
    /// density `pdf(wo, wh)`.
    pub fn sample_wh(&self, wo: &Vector3f, u: &Vector2f) -> Vector3f {
        // Stretch into the isotropic configuration.
        let vh = Vector3f::new(self.alpha_x * wo.x, self.alpha_y * wo.y, wo.z)
            .normalize();

        // Orthonormal basis around the stretched view vector.
        let len_sq = vh.x * vh.x + vh.y * vh.y;
        let t1 = if len_sq > 0.0 {
            Vector3f::new(-vh.y, vh.x, 0.0) / len_sq.sqrt()
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let t2 = vh.cross(&t1);

        // Disk sample warped toward the visible hemisphere.
        let r = u.x.sqrt();
        let phi = TWO_PI * u.y;
        let p1 = r * phi.cos();
        let mut p2 = r * phi.sin();
        let s = 0.5 * (1.0 + vh.z);
        p2 = (1.0 - s) * (1.0 - p1 * p1).max(0.0).sqrt() + s * p2;

        let nh = p1 * t1 + p2 * t2
               + (1.0 - p1 * p1 - p2 * p2).max(0.0).sqrt() * vh;

        // Unstretch and renormalize.
        Vector3f::new(self.alpha_x * nh.x,
                      self.alpha_y * nh.y,
                      nh.z.max(0.0)).normalize()
    }

    /// Density of `sample_wh` with respect to the solid angle of `wh`.
    pub fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        self.g1(wo) * wo.dot(wh).abs() * self.d(wh) / wo.z.abs()
    }
}
