// Copyright @yucwang 2021

use super::constants::{ Float, Vector2f, ONE_MINUS_EPSILON };

/// Piecewise-constant 1D distribution over [0, 1], sampled by CDF inversion.
pub struct Distribution1D {
    func: Vec<Float>,
    cdf: Vec<Float>,
    func_int: Float,
}

impl Distribution1D {
    pub fn new(f: &[Float]) -> Self {
        let n = f.len();
        debug_assert!(n > 0);

        let func: Vec<Float> = f.to_vec();
        let mut cdf = vec![0.0; n + 1];
        for i in 0..n {
            // Bin width is 1/n over the [0, 1] domain.
            cdf[i + 1] = cdf[i] + func[i] / n as Float;
        }
        let func_int = cdf[n];

        if func_int == 0.0 {
            // All-zero input degrades to the uniform distribution.
            for i in 1..=n {
                cdf[i] = i as Float / n as Float;
            }
        } else {
            for i in 1..=n {
                cdf[i] /= func_int;
            }
        }

        Self { func, cdf, func_int }
    }

    pub fn count(&self) -> usize {
        self.func.len()
    }

    pub fn func_int(&self) -> Float {
        self.func_int
    }

    /// Inverts the CDF at `u`. Returns the continuous coordinate in [0, 1],
    /// the density at that coordinate and the index of the sampled bin.
    pub fn sample_continuous(&self, u: Float) -> (Float, Float, usize) {
        let n = self.count();
        let u = u.min(ONE_MINUS_EPSILON);

        // Largest offset with cdf[offset] <= u.
        let mut offset = match self.cdf.binary_search_by(|c| {
            c.partial_cmp(&u).unwrap_or(std::cmp::Ordering::Less)
        }) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        if offset > n - 1 {
            offset = n - 1;
        }

        let pdf = if self.func_int > 0.0 {
            self.func[offset] / self.func_int
        } else {
            1.0
        };

        let mut du = u - self.cdf[offset];
        let denom = self.cdf[offset + 1] - self.cdf[offset];
        if denom > 0.0 {
            du /= denom;
        } else {
            du = 0.0;
        }

        ((offset as Float + du) / n as Float, pdf, offset)
    }

    /// Density of `sample_continuous` at the bin containing `x`.
    pub fn pdf_at(&self, x: Float) -> Float {
        let n = self.count();
        let i = ((x * n as Float) as usize).min(n - 1);
        if self.func_int > 0.0 {
            self.func[i] / self.func_int
        } else {
            1.0
        }
    }

    fn bin_pdf(&self, i: usize) -> Float {
        if self.func_int > 0.0 {
            self.func[i] / self.func_int
        } else {
            1.0
        }
    }
}

/// Hierarchical 2D distribution: one conditional distribution p(u|v) per row
/// plus a marginal p(v) over row integrals. Used for environment-map
/// importance sampling.
pub struct Distribution2D {
    p_conditional_v: Vec<Distribution1D>,
    p_marginal: Distribution1D,
}

impl Distribution2D {
    pub fn new(data: &[Float], width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);

        let mut p_conditional_v = Vec::with_capacity(height);
        for v in 0..height {
            p_conditional_v.push(Distribution1D::new(&data[v * width..(v + 1) * width]));
        }

        let marginal_func: Vec<Float> =
            p_conditional_v.iter().map(|d| d.func_int()).collect();
        let p_marginal = Distribution1D::new(&marginal_func);

        Self { p_conditional_v, p_marginal }
    }

    /// Samples (u, v) in [0, 1]^2 and returns the joint density
    /// p(u, v) = p(u|v) * p(v).
    pub fn sample_continuous(&self, u: &Vector2f) -> (Vector2f, Float) {
        let (v, pdf_v, v_off) = self.p_marginal.sample_continuous(u.y);
        let (x, pdf_u, _) = self.p_conditional_v[v_off].sample_continuous(u.x);
        (Vector2f::new(x, v), pdf_u * pdf_v)
    }

    /// Joint density at (u, v); the exact inverse of `sample_continuous`.
    pub fn pdf(&self, uv: &Vector2f) -> Float {
        let height = self.p_marginal.count();
        let width = self.p_conditional_v[0].count();

        let v = ((uv.y * height as Float) as usize).min(height - 1);
        let u = ((uv.x * width as Float) as usize).min(width - 1);

        if self.p_marginal.func_int() == 0.0 {
            return 1.0;
        }
        if self.p_conditional_v[v].func_int() == 0.0 {
            return 0.0;
        }

        self.p_marginal.bin_pdf(v) * self.p_conditional_v[v].bin_pdf(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_distribution1d_sample_pdf_round_trip() {
        let dist = Distribution1D::new(&[1.0, 3.0, 0.0, 4.0]);
        let mut rng = LcgRng::new(3);
        for _ in 0..1000 {
            let (x, pdf, off) = dist.sample_continuous(rng.next_f32());
            assert!(x >= 0.0 && x < 1.0);
            assert!(pdf > 0.0, "sampled a zero-weight bin {}", off);
            assert!((dist.pdf_at(x) - pdf).abs() < 1e-5);
        }
        // Bin 2 has zero weight and must never be sampled.
        for _ in 0..1000 {
            let (_, _, off) = dist.sample_continuous(rng.next_f32());
            assert_ne!(off, 2);
        }
    }

    #[test]
    fn test_distribution1d_bin_frequencies() {
        let dist = Distribution1D::new(&[1.0, 3.0]);
        let mut rng = LcgRng::new(11);
        let n = 100_000;
        let mut count_hi = 0usize;
        for _ in 0..n {
            let (_, _, off) = dist.sample_continuous(rng.next_f32());
            if off == 1 {
                count_hi += 1;
            }
        }
        let frac = count_hi as Float / n as Float;
        assert!((frac - 0.75).abs() < 0.01, "frac = {}", frac);
    }

    #[test]
    fn test_distribution1d_uniform_fallback() {
        let dist = Distribution1D::new(&[0.0, 0.0, 0.0]);
        let (x, pdf, _) = dist.sample_continuous(0.5);
        assert!((x - 0.5).abs() < 1e-5);
        assert!((pdf - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distribution2d_sample_pdf_round_trip() {
        let data = [
            0.0, 1.0, 2.0, 0.5,
            4.0, 0.0, 1.0, 1.0,
            0.2, 0.2, 0.2, 8.0,
        ];
        let dist = Distribution2D::new(&data, 4, 3);
        let mut rng = LcgRng::new(29);
        for _ in 0..2000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let (uv, pdf) = dist.sample_continuous(&u);
            assert!(pdf > 0.0);
            assert!((dist.pdf(&uv) - pdf).abs() < 1e-4 * pdf.max(1.0));
        }
    }
}
