// Copyright @yucwang 2021

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Nominal wavelengths used to collapse spectral data to RGB, in nm.
const RGB_WAVELENGTHS: [Float; 3] = [650.0, 550.0, 450.0];

#[derive(Debug, Clone, Copy)]
struct IorEntry {
    wavelength: Float,
    n: Float,
    k: Float,
}

/// Complex refractive index (n + ik) table, queryable by linear
/// interpolation over wavelength. Parses the refractiveindex.info CSV
/// export, where n and k values come in separate `wl,n` / `wl,k` blocks
/// with wavelengths in micrometers.
pub struct IorTable {
    data: Vec<IorEntry>,
}

impl IorTable {
    pub fn from_csv(path: &str) -> std::result::Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read ior table {}: {}", path, e))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let mut n_points: Vec<(Float, Float)> = Vec::new();
        let mut k_points: Vec<(Float, Float)> = Vec::new();
        let mut reading_k = false;

        for line in text.lines() {
            let line = line.replace(',', " ").replace('\t', " ");
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            // Header rows switch between the n block and the k block.
            if line.contains("wl") {
                reading_k = line.contains('k');
                continue;
            }

            let mut parts = line.split_whitespace();
            let wl = parts.next().and_then(|s| s.parse::<Float>().ok());
            let val = parts.next().and_then(|s| s.parse::<Float>().ok());
            if let (Some(wl), Some(val)) = (wl, val) {
                // Micrometers to nanometers.
                let wl_nm = wl * 1000.0;
                if reading_k {
                    k_points.push((wl_nm, val));
                } else {
                    n_points.push((wl_nm, val));
                }
            }
        }

        if n_points.is_empty() {
            return Err(String::from("no refractive-index data found"));
        }

        // Pair each n sample with the nearest k sample within 1 nm; tables
        // occasionally list slightly misaligned wavelength grids.
        let mut data: Vec<IorEntry> = n_points
            .iter()
            .map(|&(wl, n)| {
                let k = k_points
                    .iter()
                    .filter(|(kwl, _)| (kwl - wl).abs() < 1.0)
                    .min_by(|a, b| {
                        (a.0 - wl).abs().partial_cmp(&(b.0 - wl).abs())
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .map_or(0.0, |&(_, k)| k);
                IorEntry { wavelength: wl, n, k }
            })
            .collect();

        data.sort_by(|a, b| {
            a.wavelength.partial_cmp(&b.wavelength)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Self { data })
    }

    /// Linear interpolation at `wavelength_nm`; boundary wavelengths clamp
    /// to the nearest tabulated value.
    pub fn evaluate(&self, wavelength_nm: Float) -> (Float, Float) {
        let first = match self.data.first() {
            Some(first) => first,
            None => return (1.0, 0.0),
        };
        let last = self.data.last().unwrap();

        if wavelength_nm <= first.wavelength {
            return (first.n, first.k);
        }
        if wavelength_nm >= last.wavelength {
            return (last.n, last.k);
        }

        let hi = self.data
            .iter()
            .position(|e| e.wavelength >= wavelength_nm)
            .unwrap();
        let lo = &self.data[hi - 1];
        let hi = &self.data[hi];

        let t = (wavelength_nm - lo.wavelength) / (hi.wavelength - lo.wavelength);
        (lo.n + t * (hi.n - lo.n), lo.k + t * (hi.k - lo.k))
    }

    /// Collapses the table to per-channel (eta, k) at the nominal RGB
    /// primary wavelengths.
    pub fn to_rgb(&self) -> (RGBSpectrum, RGBSpectrum) {
        let mut eta = [0.0; 3];
        let mut k = [0.0; 3];
        for (c, &wl) in RGB_WAVELENGTHS.iter().enumerate() {
            let (n_val, k_val) = self.evaluate(wl);
            eta[c] = n_val;
            k[c] = k_val;
        }
        (RGBSpectrum::new(eta[0], eta[1], eta[2]),
         RGBSpectrum::new(k[0], k[1], k[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD_CSV: &str = "\
wl,n
0.45,1.40
0.55,0.34
0.65,0.14
wl,k
0.45,1.88
0.55,2.32
0.65,3.37
";

    #[test]
    fn test_parse_two_block_csv() {
        let table = IorTable::parse(GOLD_CSV).expect("parse failed");

        let (n, k) = table.evaluate(550.0);
        assert!((n - 0.34).abs() < 1e-5);
        assert!((k - 2.32).abs() < 1e-5);

        // Midpoint interpolates linearly.
        let (n, k) = table.evaluate(600.0);
        assert!((n - 0.24).abs() < 1e-5);
        assert!((k - 2.845).abs() < 1e-4);
    }

    #[test]
    fn test_boundaries_clamp() {
        let table = IorTable::parse(GOLD_CSV).unwrap();
        let (n_lo, _) = table.evaluate(300.0);
        let (n_hi, k_hi) = table.evaluate(900.0);
        assert!((n_lo - 1.40).abs() < 1e-5);
        assert!((n_hi - 0.14).abs() < 1e-5);
        assert!((k_hi - 3.37).abs() < 1e-5);
    }

    #[test]
    fn test_to_rgb_uses_primary_wavelengths() {
        let table = IorTable::parse(GOLD_CSV).unwrap();
        let (eta, k) = table.to_rgb();
        assert!((eta[0] - 0.14).abs() < 1e-5);
        assert!((eta[1] - 0.34).abs() < 1e-5);
        assert!((eta[2] - 1.40).abs() < 1e-5);
        assert!((k[0] - 3.37).abs() < 1e-5);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(IorTable::parse("wl,n\n").is_err());
        assert!(IorTable::parse("").is_err());
    }
}
