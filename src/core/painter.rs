//! Editable pixel canvas backing the image painter.

use crate::config::{DEFAULT_PAINT_COLOR, IMAGE_DIR, IMAGE_EXTENSION};
use crate::core::error::PreconditionError;
use crate::core::image::{EncodedImage, ImageBuffer, ImageSize, Rgb, encode};

/// Square canvas with a current paint colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelCanvas {
    buffer: ImageBuffer,
    color: Rgb,
}

impl PixelCanvas {
    pub fn new(size: ImageSize) -> Self {
        Self {
            buffer: ImageBuffer::new(size),
            color: Rgb::from_hex(DEFAULT_PAINT_COLOR).unwrap_or(Rgb::new(0, 255, 0)),
        }
    }

    pub fn size(&self) -> ImageSize {
        self.buffer.size()
    }

    pub fn side(&self) -> usize {
        self.buffer.side()
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.buffer.pixel(x, y)
    }

    /// Change the paint colour from `#rrggbb`. Invalid input is ignored.
    pub fn set_color(&mut self, hex: &str) -> bool {
        match Rgb::from_hex(hex) {
            Some(color) => {
                self.color = color;
                true
            }
            None => false,
        }
    }

    /// Paint one pixel with the current colour; out-of-range is a no-op.
    pub fn paint(&mut self, x: usize, y: usize) -> bool {
        self.buffer.set_pixel(x, y, self.color)
    }

    /// Reset every pixel to black.
    pub fn clear(&mut self) {
        self.buffer.fill(Rgb::BLACK);
    }

    /// Switch to another preset, discarding the drawing.
    pub fn resize(&mut self, size: ImageSize) {
        self.buffer = ImageBuffer::new(size);
    }

    pub fn encode(&self) -> EncodedImage {
        encode(&self.buffer)
    }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new(ImageSize::default())
    }
}

/// Device path for an image name: `/images/<name>.bin`.
///
/// Names are restricted to ASCII letters, digits and underscores.
pub fn image_path(name: &str) -> Result<String, PreconditionError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(PreconditionError::InvalidImageName(name.to_string()));
    }
    Ok(format!("{}{}{}", IMAGE_DIR, name, IMAGE_EXTENSION))
}
