//! Mipmap chains.
//!
//! A chain for a `width` x `height` base image holds `log2(max(width, height))` levels,
//! each half the size of the previous one (never below 1), ordered largest first.
//! Containers that store levels smallest first reverse the order themselves.

use crate::color_8888::Color8888;
use crate::error::TextureResult;
use crate::image::RgbaImage;
use alloc::vec::Vec;

/// Number of levels below the base image.
#[inline]
pub fn level_count(width: u32, height: u32) -> usize {
    width.max(height).max(1).ilog2() as usize
}

/// Sizes of the levels below the base image, largest first.
pub fn level_dimensions(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let mut size = (width, height);
    (0..level_count(width, height)).map(move |_| {
        size = ((size.0 / 2).max(1), (size.1 / 2).max(1));
        size
    })
}

/// Halves `image` with a 2x2 box filter.
pub fn downsample(image: &RgbaImage) -> TextureResult<RgbaImage> {
    let width = (image.width() / 2).max(1);
    let height = (image.height() / 2).max(1);
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let samples = [
                image.pixel_clamped(x * 2, y * 2),
                image.pixel_clamped(x * 2 + 1, y * 2),
                image.pixel_clamped(x * 2, y * 2 + 1),
                image.pixel_clamped(x * 2 + 1, y * 2 + 1),
            ];
            pixels.push(average(&samples));
        }
    }
    RgbaImage::new(width, height, pixels)
}

fn average(samples: &[Color8888; 4]) -> Color8888 {
    let sum = samples.iter().fold([0u32; 4], |mut sum, px| {
        sum[0] += px.r as u32;
        sum[1] += px.g as u32;
        sum[2] += px.b as u32;
        sum[3] += px.a as u32;
        sum
    });
    Color8888::new(
        ((sum[0] + 2) / 4) as u8,
        ((sum[1] + 2) / 4) as u8,
        ((sum[2] + 2) / 4) as u8,
        ((sum[3] + 2) / 4) as u8,
    )
}

/// Builds the full chain below `image`, largest first.
pub fn build_chain(image: &RgbaImage) -> TextureResult<Vec<RgbaImage>> {
    let count = level_count(image.width(), image.height());
    let mut chain: Vec<RgbaImage> = Vec::with_capacity(count);
    for _ in 0..count {
        let next = downsample(chain.last().unwrap_or(image))?;
        chain.push(next);
    }
    Ok(chain)
}
