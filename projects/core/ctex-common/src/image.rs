//! Row-major RGBA images.

use crate::color_8888::Color8888;
use crate::error::{TextureError, TextureResult};
use alloc::vec::Vec;

/// A row-major image of [`Color8888`] pixels with positive dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<Color8888>,
}

impl RgbaImage {
    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// [`TextureError::InvalidDimensions`] if either dimension is zero or the
    /// buffer does not hold exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<Color8888>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::dimensions(
                width,
                height,
                "image dimensions must be positive",
            ));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(TextureError::dimensions(
                width,
                height,
                "pixel count does not match dimensions",
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color8888) -> TextureResult<Self> {
        Self::new(
            width,
            height,
            alloc::vec![color; width as usize * height as usize],
        )
    }

    /// Creates an image from tightly packed `r, g, b, a` bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> TextureResult<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return Err(TextureError::dimensions(
                width,
                height,
                "byte count is not width * height * 4",
            ));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Color8888::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Returns the pixels as tightly packed `r, g, b, a` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_array()).collect()
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Color8888] {
        &self.pixels
    }

    /// Consumes the image, returning its pixels.
    #[inline]
    pub fn into_pixels(self) -> Vec<Color8888> {
        self.pixels
    }

    /// Pixel at `(x, y)`, clamping coordinates to the image edge.
    ///
    /// Encoders use this to fill tile padding beyond the image bounds.
    #[inline]
    pub fn pixel_clamped(&self, x: u32, y: u32) -> Color8888 {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}
