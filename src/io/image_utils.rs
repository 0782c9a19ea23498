// Copyright @yucwang 2021

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use exr::prelude::*;
use image::io::Reader as ImageReader;
use std::path::Path;

/// A decoded image holding linear radiometric RGB values. LDR sources are
/// gamma-decoded at load time; HDR sources are taken as already linear.
pub struct LinearImage {
    width: usize,
    height: usize,
    data: Vec<RGBSpectrum>,
}

fn srgb_to_linear(v: Float) -> Float {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl LinearImage {
    pub fn from_pixels(width: usize, height: usize,
                       data: Vec<RGBSpectrum>) -> std::result::Result<Self, String> {
        if data.len() != width * height {
            return Err(format!("pixel count {} does not match {}x{}",
                               data.len(), width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn at(&self, x: usize, y: usize) -> RGBSpectrum {
        self.data[y * self.width + x]
    }

    pub fn from_exr(path: &str) -> std::result::Result<Self, String> {
        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .rgba_channels(
                |resolution, _| {
                    let width = resolution.width() as usize;
                    let height = resolution.height() as usize;
                    LinearImage {
                        width,
                        height,
                        data: vec![RGBSpectrum::default(); width * height],
                    }
                },
                |image, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                    let x = position.x() as usize;
                    let y = position.y() as usize;
                    image.data[y * image.width + x] = RGBSpectrum::new(r, g, b);
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_file(path)
            .map_err(|e| format!("failed to read exr {}: {}", path, e))?;

        Ok(image.layer_data.channel_data.pixels)
    }

    pub fn from_image(path: &str, srgb: bool) -> std::result::Result<Self, String> {
        let img = ImageReader::open(path)
            .map_err(|e| format!("failed to open image {}: {}", path, e))?
            .decode()
            .map_err(|e| format!("failed to decode image {}: {}", path, e))?;

        let rgb = img.to_rgb32f();
        let width = rgb.width() as usize;
        let height = rgb.height() as usize;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let p = rgb.get_pixel(x as u32, y as u32);
                let (mut r, mut g, mut b) = (p[0], p[1], p[2]);
                if srgb {
                    r = srgb_to_linear(r);
                    g = srgb_to_linear(g);
                    b = srgb_to_linear(b);
                }
                data.push(RGBSpectrum::new(r, g, b));
            }
        }

        Ok(Self { width, height, data })
    }

    /// Loads any supported format, gamma-decoding LDR sources. Radiance HDR
    /// and OpenEXR data is already linear.
    pub fn from_file(path: &str) -> std::result::Result<Self, String> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "exr" => Self::from_exr(path),
            "hdr" => Self::from_image(path, false),
            "jpg" | "jpeg" | "png" => Self::from_image(path, true),
            _ => Err(format!("unsupported image format: {}", ext)),
        }
    }
}
