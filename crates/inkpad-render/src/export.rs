//! Raster export boundary: encode the pixel buffer and hand the payload
//! to the host for saving.

use image::{ImageFormat, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Encoded image formats supported for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
        }
    }
}

/// An encoded image payload ready for the host to save.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// Suggested filename, `handwritten.<ext>`.
    pub filename: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// Write the payload into `dir` under its suggested filename and
    /// return the full path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Encode the current canvas pixels for download.
///
/// Stateless boundary function: the pixel buffer goes in, an encoded
/// payload comes out. JPEG has no alpha channel, so pixels are flattened
/// over white first.
pub fn export_image(pixels: &RgbaImage, format: ExportFormat) -> Result<ExportedImage, ExportError> {
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);

    match format {
        ExportFormat::Png => {
            pixels.write_to(&mut cursor, ImageFormat::Png)?;
        }
        ExportFormat::Jpeg => {
            flatten_over_white(pixels).write_to(&mut cursor, ImageFormat::Jpeg)?;
        }
    }

    let filename = format!("handwritten.{}", format.extension());
    log::info!("exported {} ({} bytes)", filename, bytes.len());
    Ok(ExportedImage { filename, bytes })
}

/// Composite the buffer over a white page, dropping the alpha channel.
fn flatten_over_white(pixels: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let px = pixels.get_pixel(x, y);
        let a = px[3] as f64 / 255.0;
        let mut rgb = [0u8; 3];
        for c in 0..3 {
            rgb[c] = (px[c] as f64 * a + 255.0 * (1.0 - a)).round() as u8;
        }
        image::Rgb(rgb)
    })
}
