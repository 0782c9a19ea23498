// Copyright @yucwang 2021

use super::constants::{ INV_PI, PI, TWO_PI, Float, Vector2f, Vector3f };

pub fn sample_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1.0 - z * z).max(0.0).sqrt();
    let phi: Float = TWO_PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_hemisphere_pdf() -> Float {
    INV_PI / 2.0
}

pub fn sample_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r: Float;

    if r1 == 0.0 && r2 == 0.0 {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = sample_uniform_disk_concentric(u);
    let z = (1.0 - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_disk_samples_stay_in_unit_disk() {
        let mut rng = LcgRng::new(7);
        for _ in 0..1000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let p = sample_uniform_disk_concentric(&u);
            assert!(p.x * p.x + p.y * p.y <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_cosine_hemisphere_mean_matches_expected() {
        // E[cos theta] under the cosine-weighted density is 2/3.
        let mut rng = LcgRng::new(13);
        let n = 100_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let w = sample_cosine_hemisphere(&u);
            assert!(w.z >= 0.0);
            sum += w.z;
        }
        let mean = sum / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean cos = {}", mean);
    }
}
