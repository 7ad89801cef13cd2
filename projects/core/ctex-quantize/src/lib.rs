#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod blocks;
mod dither;
mod exact;
pub mod settings;
mod wu;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use blocks::{quantize_blocks, QuantizedBlocks};
pub use settings::{QuantizeSettings, QuantizeSettingsBuilder, MAX_COLORS};

use alloc::vec::Vec;
use ctex_common::texture::DitherMode;
use ctex_common::{Color8888, RgbaImage, TextureError, TextureResult};

/// An image reduced to a palette and one index per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    /// Palette colors; at most the requested number.
    pub palette: Vec<Color8888>,
    /// Row-major palette indices.
    pub indices: Vec<u8>,
}

impl QuantizedImage {
    /// Color of every pixel after quantization, row-major.
    pub fn to_pixels(&self) -> Vec<Color8888> {
        self.indices
            .iter()
            .map(|&index| self.palette[index as usize])
            .collect()
    }
}

/// Reduces `image` to at most `settings.max_colors` colors.
///
/// # Errors
///
/// [`TextureError::InvalidDimensions`] if `max_colors` is outside `1..=256`.
pub fn quantize(image: &RgbaImage, settings: &QuantizeSettings) -> TextureResult<QuantizedImage> {
    quantize_pixels(image.pixels(), image.width(), image.height(), settings)
}

/// Reduces row-major `pixels` of a `width` x `height` image to at most
/// `settings.max_colors` colors.
///
/// # Errors
///
/// [`TextureError::InvalidDimensions`] if `max_colors` is outside `1..=256`, the image is
/// empty, or `pixels` does not hold `width * height` values.
pub fn quantize_pixels(
    pixels: &[Color8888],
    width: u32,
    height: u32,
    settings: &QuantizeSettings,
) -> TextureResult<QuantizedImage> {
    settings.validate()?;
    if pixels.is_empty() || pixels.len() != width as usize * height as usize {
        return Err(TextureError::dimensions(width, height, "cannot quantize an empty image"));
    }

    let max_colors = settings.max_colors as usize;
    if let Some(exact) = exact::exact_palette(pixels, max_colors) {
        tracing::debug!(colors = exact.palette.len(), "quantized through exact palette");
        return Ok(exact);
    }

    let reduction = wu::reduce(pixels, max_colors);
    let indices = match settings.dither {
        DitherMode::None => reduction.indices,
        DitherMode::FloydSteinberg => {
            dither::floyd_steinberg(pixels, width as usize, &reduction.palette)
        }
    };
    tracing::debug!(
        colors = reduction.palette.len(),
        dither = ?settings.dither,
        "quantized through Wu reduction"
    );
    Ok(QuantizedImage {
        palette: reduction.palette,
        indices,
    })
}
