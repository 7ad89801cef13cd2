//! DXT color blocks: two RGB565 endpoints plus 2-bit selectors.

use crate::color_8888::Color8888;
use crate::pixel::PixelFormat;

use super::BlockByteOrder;

/// Decodes an RGB565 endpoint.
#[inline]
fn endpoint(value: u16) -> Color8888 {
    // Rgb565 always has a direct conversion.
    PixelFormat::Rgb565
        .codec()
        .decode(value as u32)
        .unwrap_or(Color8888::BLACK)
}

#[inline]
fn encode_endpoint(color: Color8888) -> u16 {
    PixelFormat::Rgb565.codec().encode(color).unwrap_or(0) as u16
}

#[inline]
fn blend(a: u8, b: u8, wa: u32, wb: u32) -> u8 {
    ((a as u32 * wa + b as u32 * wb) / (wa + wb)) as u8
}

/// The four colors addressable by a color block.
///
/// With `c0 > c1` (or when `four_color` forces it, as in DXT3/DXT5) the block holds the
/// endpoints and the 2:1 and 1:2 blends. Otherwise it holds the endpoints, their 1:1 blend
/// and transparent black.
pub(crate) fn block_palette(c0: u16, c1: u16, four_color: bool) -> [Color8888; 4] {
    let a = endpoint(c0);
    let b = endpoint(c1);
    if four_color || c0 > c1 {
        [
            a,
            b,
            Color8888::new(blend(a.r, b.r, 2, 1), blend(a.g, b.g, 2, 1), blend(a.b, b.b, 2, 1), 255),
            Color8888::new(blend(a.r, b.r, 1, 2), blend(a.g, b.g, 1, 2), blend(a.b, b.b, 1, 2), 255),
        ]
    } else {
        [
            a,
            b,
            Color8888::new(blend(a.r, b.r, 1, 1), blend(a.g, b.g, 1, 1), blend(a.b, b.b, 1, 1), 255),
            Color8888::TRANSPARENT,
        ]
    }
}

/// Reads endpoints and the 16 selectors of an 8-byte color block.
fn read_block(block: &[u8; 8], order: BlockByteOrder) -> (u16, u16, [u8; 16]) {
    let mut selectors = [0u8; 16];
    match order {
        BlockByteOrder::Standard => {
            let c0 = u16::from_le_bytes([block[0], block[1]]);
            let c1 = u16::from_le_bytes([block[2], block[3]]);
            let bits = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
            for (i, selector) in selectors.iter_mut().enumerate() {
                *selector = ((bits >> (i * 2)) & 3) as u8;
            }
            (c0, c1, selectors)
        }
        BlockByteOrder::GameCube => {
            let c0 = u16::from_be_bytes([block[0], block[1]]);
            let c1 = u16::from_be_bytes([block[2], block[3]]);
            for row in 0..4 {
                let byte = block[4 + row];
                for column in 0..4 {
                    selectors[row * 4 + column] = (byte >> (6 - column * 2)) & 3;
                }
            }
            (c0, c1, selectors)
        }
    }
}

fn write_block(c0: u16, c1: u16, selectors: &[u8; 16], order: BlockByteOrder) -> [u8; 8] {
    let mut block = [0u8; 8];
    match order {
        BlockByteOrder::Standard => {
            block[0..2].copy_from_slice(&c0.to_le_bytes());
            block[2..4].copy_from_slice(&c1.to_le_bytes());
            let bits = selectors
                .iter()
                .enumerate()
                .fold(0u32, |bits, (i, &s)| bits | ((s as u32 & 3) << (i * 2)));
            block[4..8].copy_from_slice(&bits.to_le_bytes());
        }
        BlockByteOrder::GameCube => {
            block[0..2].copy_from_slice(&c0.to_be_bytes());
            block[2..4].copy_from_slice(&c1.to_be_bytes());
            for row in 0..4 {
                block[4 + row] = (0..4).fold(0u8, |byte, column| {
                    byte | ((selectors[row * 4 + column] & 3) << (6 - column * 2))
                });
            }
        }
    }
    block
}

/// Decodes a color block into 16 row-major pixels.
pub(crate) fn decode_color_block(
    block: &[u8; 8],
    order: BlockByteOrder,
    four_color: bool,
) -> [Color8888; 16] {
    let (c0, c1, selectors) = read_block(block, order);
    let palette = block_palette(c0, c1, four_color);
    let mut pixels = [Color8888::TRANSPARENT; 16];
    for (pixel, &selector) in pixels.iter_mut().zip(selectors.iter()) {
        *pixel = palette[selector as usize];
    }
    pixels
}

#[inline]
fn rgb_distance(a: Color8888, b: Color8888) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Encodes 16 row-major pixels into a color block.
///
/// Endpoints are chosen by exhaustive search over pairs of the block's own colors
/// (quantized to RGB565), keeping the pair with the least total squared distance.
/// When `four_color` is false and the block has pixels with alpha below 128, the
/// three-color mode is used and those pixels select transparent black.
pub(crate) fn encode_color_block(
    pixels: &[Color8888; 16],
    order: BlockByteOrder,
    four_color: bool,
) -> [u8; 8] {
    let punch_through = !four_color && pixels.iter().any(|p| p.a < 128);

    let mut candidates = [0u16; 16];
    let mut count = 0;
    for pixel in pixels.iter().filter(|p| !punch_through || p.a >= 128) {
        let value = encode_endpoint(*pixel);
        if !candidates[..count].contains(&value) {
            candidates[count] = value;
            count += 1;
        }
    }

    if count == 0 {
        return write_block(0, 0, &[3; 16], order);
    }

    let mut best_error = u32::MAX;
    let mut best = (candidates[0], candidates[0], [0u8; 16]);
    for i in 0..count {
        for j in i..count {
            let (lo, hi) = (
                candidates[i].min(candidates[j]),
                candidates[i].max(candidates[j]),
            );
            let (c0, c1) = if punch_through { (lo, hi) } else { (hi, lo) };
            let palette = block_palette(c0, c1, four_color);
            let usable = if four_color || c0 > c1 { 4 } else { 3 };

            let mut error = 0u32;
            let mut selectors = [0u8; 16];
            for (pixel, selector) in pixels.iter().zip(selectors.iter_mut()) {
                if punch_through && pixel.a < 128 {
                    *selector = 3;
                    continue;
                }
                let (index, distance) = palette[..usable]
                    .iter()
                    .enumerate()
                    .map(|(index, &entry)| (index, rgb_distance(*pixel, entry)))
                    .min_by_key(|&(_, distance)| distance)
                    .unwrap_or((0, 0));
                *selector = index as u8;
                error += distance;
            }

            if error < best_error {
                best_error = error;
                best = (c0, c1, selectors);
            }
        }
    }

    write_block(best.0, best.1, &best.2, order)
}
