// Copyright @yucwang 2021

use crate::io::exr_utils::write_exr_to_file;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use std::fs::File;
use std::path::Path;

fn linear_to_gamma(v: Float) -> Float {
    v.max(0.0).powf(1.0 / 2.2)
}

fn reinhard(v: Float) -> Float {
    v / (1.0 + v)
}

fn quantize(v: Float) -> u8 {
    (255.99 * v.max(0.0).min(1.0)) as u8
}

/// Save a rendered bitmap. HDR destinations (.exr, .hdr) receive the linear
/// data unmodified; LDR destinations are Reinhard tone-mapped, gamma-encoded
/// and quantized to 8 bits per channel.
pub fn save_image(bitmap: &Bitmap, file_path: &str) -> std::result::Result<(), String> {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let width = bitmap.width();
    let height = bitmap.height();

    match ext.as_str() {
        "exr" => write_exr_to_file(bitmap, file_path),
        "hdr" => {
            let pixels: Vec<image::Rgb<f32>> = bitmap
                .data()
                .iter()
                .map(|p| image::Rgb([p.x, p.y, p.z]))
                .collect();
            let file = File::create(file_path)
                .map_err(|e| format!("failed to create {}: {}", file_path, e))?;
            image::codecs::hdr::HdrEncoder::new(file)
                .encode(&pixels, width, height)
                .map_err(|e| format!("failed to write hdr {}: {}", file_path, e))
        }
        "png" | "jpg" | "jpeg" => {
            let mut out = image::RgbImage::new(width as u32, height as u32);
            for y in 0..height {
                for x in 0..width {
                    let p = bitmap[(x, y)];
                    let rgb = [
                        quantize(linear_to_gamma(reinhard(p.x))),
                        quantize(linear_to_gamma(reinhard(p.y))),
                        quantize(linear_to_gamma(reinhard(p.z))),
                    ];
                    out.put_pixel(x as u32, y as u32, image::Rgb(rgb));
                }
            }
            out.save(file_path)
                .map_err(|e| format!("failed to write {}: {}", file_path, e))
        }
        _ => Err(format!("unsupported output format: {}", ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_stays_in_range() {
        for &v in &[0.0, 0.18, 1.0, 10.0, 1e4] {
            let mapped = linear_to_gamma(reinhard(v));
            assert!(mapped >= 0.0 && mapped < 1.0);
        }
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        // Tone mapping is monotone.
        assert!(reinhard(0.5) < reinhard(2.0));
    }

    #[test]
    fn test_unknown_extension_is_an_error() {
        let bitmap = Bitmap::new(2, 2);
        assert!(save_image(&bitmap, "render.tiff").is_err());
    }
}
