//! RGBA raster to RGB565 binary encoding.
//!
//! # Output Format
//!
//! - Bytes 0-1: width, 16-bit big-endian
//! - Bytes 2-3: height, 16-bit big-endian
//! - Bytes 4+: one 16-bit big-endian RGB565 value per pixel, row-major
//!
//! Bit layout of a pixel: `RRRRRGGG GGGBBBBB`. Alpha is discarded.

use std::fmt;

use crate::core::error::PreconditionError;

const HEADER_LEN: usize = 4;
const BYTES_PER_PIXEL: usize = 4;

// =============================================================================
// Colours
// =============================================================================

/// 8-bit-per-channel colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Pack into RGB565: top 5 bits of red, 6 of green, 5 of blue.
    pub fn to_rgb565(self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }

    /// Expand an RGB565 value back to 8 bits per channel (low bits zero).
    pub fn from_rgb565(value: u16) -> Self {
        Self::new(
            ((value >> 8) & 0xF8) as u8,
            ((value >> 3) & 0xFC) as u8,
            ((value << 3) & 0xF8) as u8,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =============================================================================
// Image Buffer
// =============================================================================

/// Supported square canvas sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageSize {
    #[default]
    Small,
    Large,
}

impl ImageSize {
    pub const ALL: [ImageSize; 2] = [ImageSize::Small, ImageSize::Large];

    pub fn side(self) -> usize {
        match self {
            Self::Small => 16,
            Self::Large => 32,
        }
    }

    pub fn from_side(side: usize) -> Result<Self, PreconditionError> {
        match side {
            16 => Ok(Self::Small),
            32 => Ok(Self::Large),
            other => Err(PreconditionError::UnsupportedImageSize(other)),
        }
    }
}

/// Square RGBA raster, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    size: ImageSize,
    rgba: Vec<u8>,
}

impl ImageBuffer {
    /// Opaque black canvas.
    pub fn new(size: ImageSize) -> Self {
        let mut buffer = Self {
            size,
            rgba: vec![0; size.side() * size.side() * BYTES_PER_PIXEL],
        };
        buffer.fill(Rgb::BLACK);
        buffer
    }

    /// Wrap raw RGBA data, rejecting unsupported sizes before any encoding.
    pub fn from_rgba(side: usize, rgba: Vec<u8>) -> Result<Self, PreconditionError> {
        let size = ImageSize::from_side(side)?;
        let expected = side * side * BYTES_PER_PIXEL;
        if rgba.len() != expected {
            return Err(PreconditionError::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { size, rgba })
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn side(&self) -> usize {
        self.size.side()
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        let side = self.side();
        (x < side && y < side).then(|| (y * side + x) * BYTES_PER_PIXEL)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        let i = self.offset(x, y)?;
        Some(Rgb::new(self.rgba[i], self.rgba[i + 1], self.rgba[i + 2]))
    }

    /// Set an opaque pixel. Returns `false` when out of range.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        let Some(i) = self.offset(x, y) else {
            return false;
        };
        self.rgba[i..i + BYTES_PER_PIXEL].copy_from_slice(&[color.r, color.g, color.b, 0xFF]);
        true
    }

    pub fn fill(&mut self, color: Rgb) {
        for px in self.rgba.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[color.r, color.g, color.b, 0xFF]);
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Header plus RGB565 pixel stream, ready to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage(Vec<u8>);

impl EncodedImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn width(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    pub fn height(&self) -> u16 {
        u16::from_be_bytes([self.0[2], self.0[3]])
    }

    /// Packed value of the pixel at row-major `index`.
    pub fn pixel(&self, index: usize) -> Option<u16> {
        let at = HEADER_LEN + index * 2;
        let bytes = self.0.get(at..at + 2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

/// Encode a raster. Pure and deterministic.
pub fn encode(buffer: &ImageBuffer) -> EncodedImage {
    let side = buffer.side() as u16;
    let mut out = Vec::with_capacity(HEADER_LEN + buffer.side() * buffer.side() * 2);
    out.extend_from_slice(&side.to_be_bytes());
    out.extend_from_slice(&side.to_be_bytes());
    for px in buffer.rgba().chunks_exact(BYTES_PER_PIXEL) {
        let value = Rgb::new(px[0], px[1], px[2]).to_rgb565();
        out.extend_from_slice(&value.to_be_bytes());
    }
    EncodedImage(out)
}
