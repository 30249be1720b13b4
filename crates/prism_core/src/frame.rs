//! Color buffer the renderers draw into, with BMP export.

use std::path::Path;

use image::{ImageFormat, RgbImage};
use prism_math::{Color, ColorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Failed to save frame to {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Linear color buffer, row-major with (0, 0) at the top-left.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Quantize to packed 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgb8()).collect()
    }

    /// Write the buffer as an uncompressed 24-bit BMP.
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> Result<(), FrameError> {
        let path = path.as_ref();
        let image = RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(self.get(x, y).to_rgb8()));

        image
            .save_with_format(path, ImageFormat::Bmp)
            .map_err(|source| FrameError::Save {
                path: path.display().to_string(),
                source,
            })?;

        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}
