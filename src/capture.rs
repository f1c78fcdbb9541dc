//! Headless capture: PNG screenshots of rendered frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::{error::EmuError, ppu::image::Image};

/// Save `image` as an 8-bit RGB PNG at `path`.
pub fn save_png(image: &Image, path: &Path) -> Result<(), EmuError> {
    let file = File::create(path).map_err(|source| EmuError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, image.width() as u32, image.height() as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_rgb_bytes())?;
    writer.finish()?;
    Ok(())
}
