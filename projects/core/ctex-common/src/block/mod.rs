//! DXT (S3TC) block codecs.
//!
//! Blocks cover 4x4 pixels. DXT1 stores two RGB565 endpoints and 2-bit selectors in
//! 8 bytes; DXT3 prefixes 8 bytes of explicit 4-bit alpha; DXT5 prefixes 8 bytes of
//! interpolated alpha. Images whose sides are not multiples of 4 are padded with the
//! edge pixels on encode, and the padding is dropped on decode.

mod alpha;
mod color;

use crate::color_8888::Color8888;
use crate::error::{require_len, TextureResult};
use crate::image::RgbaImage;
use alloc::vec::Vec;

/// DXT flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DxtVariant {
    /// Color with optional 1-bit alpha.
    Dxt1,
    /// Color plus explicit 4-bit alpha.
    Dxt3,
    /// Color plus interpolated 8-bit alpha.
    Dxt5,
}

impl DxtVariant {
    /// Bytes per 4x4 block.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            DxtVariant::Dxt1 => 8,
            DxtVariant::Dxt3 | DxtVariant::Dxt5 => 16,
        }
    }
}

/// Byte layout of a color block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockByteOrder {
    /// Little-endian endpoints; selector of pixel 0 in the lowest bits.
    Standard,
    /// Big-endian endpoints; each row byte holds pixel 0 in its top two bits.
    GameCube,
}

/// Number of bytes a `width` x `height` image occupies as `variant` blocks.
#[inline]
pub fn encoded_len(variant: DxtVariant, width: u32, height: u32) -> usize {
    width.div_ceil(4) as usize * height.div_ceil(4) as usize * variant.block_size()
}

/// Decodes one DXT1 block into 16 row-major pixels.
#[inline]
pub fn decode_dxt1_block(block: &[u8; 8], order: BlockByteOrder) -> [Color8888; 16] {
    color::decode_color_block(block, order, false)
}

/// Encodes 16 row-major pixels as one DXT1 block.
#[inline]
pub fn encode_dxt1_block(pixels: &[Color8888; 16], order: BlockByteOrder) -> [u8; 8] {
    color::encode_color_block(pixels, order, false)
}

/// Decodes one standard-layout block of any variant into 16 row-major pixels.
pub fn decode_block(variant: DxtVariant, block: &[u8]) -> TextureResult<[Color8888; 16]> {
    require_len(block, variant.block_size())?;
    let mut color = [0u8; 8];
    let mut alpha_half = [0u8; 8];
    match variant {
        DxtVariant::Dxt1 => {
            color.copy_from_slice(&block[..8]);
            return Ok(decode_dxt1_block(&color, BlockByteOrder::Standard));
        }
        DxtVariant::Dxt3 | DxtVariant::Dxt5 => {
            alpha_half.copy_from_slice(&block[..8]);
            color.copy_from_slice(&block[8..16]);
        }
    }

    let alpha = match variant {
        DxtVariant::Dxt3 => alpha::decode_explicit_alpha(&alpha_half),
        _ => alpha::decode_interpolated_alpha(&alpha_half),
    };
    let mut pixels = color::decode_color_block(&color, BlockByteOrder::Standard, true);
    for (pixel, a) in pixels.iter_mut().zip(alpha) {
        pixel.a = a;
    }
    Ok(pixels)
}

/// Encodes 16 row-major pixels as one standard-layout block of `variant`.
pub fn encode_block(variant: DxtVariant, pixels: &[Color8888; 16]) -> Vec<u8> {
    match variant {
        DxtVariant::Dxt1 => encode_dxt1_block(pixels, BlockByteOrder::Standard).to_vec(),
        DxtVariant::Dxt3 | DxtVariant::Dxt5 => {
            let alpha = match variant {
                DxtVariant::Dxt3 => alpha::encode_explicit_alpha(pixels),
                _ => alpha::encode_interpolated_alpha(pixels),
            };
            let color = color::encode_color_block(pixels, BlockByteOrder::Standard, true);
            let mut block = Vec::with_capacity(16);
            block.extend_from_slice(&alpha);
            block.extend_from_slice(&color);
            block
        }
    }
}

/// Gathers the 4x4 block whose top-left pixel is `(x, y)`, clamping at the edges.
pub fn gather_block(image: &RgbaImage, x: u32, y: u32) -> [Color8888; 16] {
    let mut pixels = [Color8888::TRANSPARENT; 16];
    for (i, pixel) in pixels.iter_mut().enumerate() {
        *pixel = image.pixel_clamped(x + (i as u32 % 4), y + (i as u32 / 4));
    }
    pixels
}

/// Writes a decoded block into a row-major pixel buffer, skipping pixels outside it.
pub fn scatter_block(
    pixels: &mut [Color8888],
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    block: &[Color8888; 16],
) {
    for (i, &pixel) in block.iter().enumerate() {
        let px = x + i as u32 % 4;
        let py = y + i as u32 / 4;
        if px < width && py < height {
            pixels[(py * width + px) as usize] = pixel;
        }
    }
}

/// Decodes a linear run of blocks (row-major block order) into an image.
pub fn decode_image(
    variant: DxtVariant,
    data: &[u8],
    width: u32,
    height: u32,
) -> TextureResult<RgbaImage> {
    require_len(data, encoded_len(variant, width, height))?;
    let mut pixels = alloc::vec![Color8888::TRANSPARENT; width as usize * height as usize];
    let blocks = data.chunks_exact(variant.block_size());
    let positions = (0..height.div_ceil(4))
        .flat_map(|by| (0..width.div_ceil(4)).map(move |bx| (bx * 4, by * 4)));
    for ((x, y), block) in positions.zip(blocks) {
        let decoded = decode_block(variant, block)?;
        scatter_block(&mut pixels, width, height, x, y, &decoded);
    }
    RgbaImage::new(width, height, pixels)
}

/// Encodes an image as a linear run of blocks (row-major block order).
pub fn encode_image(variant: DxtVariant, image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(variant, image.width(), image.height()));
    for y in (0..image.height()).step_by(4) {
        for x in (0..image.width()).step_by(4) {
            out.extend_from_slice(&encode_block(variant, &gather_block(image, x, y)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(DxtVariant::Dxt1, 8, 8, 32)]
    #[case(DxtVariant::Dxt3, 8, 8, 64)]
    #[case(DxtVariant::Dxt5, 6, 2, 32)]
    fn encoded_len_rounds_to_blocks(
        #[case] variant: DxtVariant,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(encoded_len(variant, width, height), expected);
    }

    #[rstest]
    #[case(DxtVariant::Dxt1)]
    #[case(DxtVariant::Dxt3)]
    #[case(DxtVariant::Dxt5)]
    fn solid_image_round_trips_at_565_precision(#[case] variant: DxtVariant) {
        let color = Color8888::new(255, 0, 255, 255);
        let image = RgbaImage::filled(8, 8, color).unwrap();
        let data = encode_image(variant, &image);
        assert_eq!(data.len(), encoded_len(variant, 8, 8));
        assert_eq!(decode_image(variant, &data, 8, 8).unwrap(), image);
    }

    #[test]
    fn dxt5_keeps_smooth_alpha() {
        let mut pixels = Vec::new();
        for i in 0..16u32 {
            pixels.push(Color8888::new(0, 0, 0, (i * 17) as u8));
        }
        let image = RgbaImage::new(4, 4, pixels).unwrap();
        let decoded = decode_image(DxtVariant::Dxt5, &encode_image(DxtVariant::Dxt5, &image), 4, 4)
            .unwrap();
        for (original, decoded) in image.pixels().iter().zip(decoded.pixels()) {
            assert!((original.a as i32 - decoded.a as i32).abs() <= 18);
        }
    }

    #[test]
    fn partial_blocks_decode_to_requested_size() {
        let image = gradient_image(6, 5);
        let data = encode_image(DxtVariant::Dxt1, &image);
        let decoded = decode_image(DxtVariant::Dxt1, &data, 6, 5).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 5));
    }

    #[test]
    fn truncated_data_is_rejected() {
        assert!(decode_image(DxtVariant::Dxt3, &[0u8; 15], 4, 4).is_err());
    }
}
