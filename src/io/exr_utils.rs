// Copyright @yucwang 2021

use crate::math::bitmap::Bitmap;

use exr::prelude::*;

/// Write a rendered bitmap to an OpenEXR file, linear and unmodified.
pub fn write_exr_to_file(bitmap: &Bitmap, file_path: &str) -> std::result::Result<(), String> {
    log::info!("Starting writing openexr image: {}.", file_path);

    let width = bitmap.width();
    let height = bitmap.height();
    write_rgb_file(file_path, width, height, |x, y| {
        let p = bitmap[(x, y)];
        (p.x, p.y, p.z)
    })
    .map_err(|e| format!("failed to write exr {}: {}", file_path, e))
}
