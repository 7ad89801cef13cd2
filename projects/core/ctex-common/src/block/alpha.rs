//! Alpha halves of DXT3 (explicit 4-bit) and DXT5 (interpolated) blocks.

use crate::color_8888::Color8888;

/// Decodes 64 bits of explicit 4-bit alpha, pixel 0 in the lowest nibble.
pub(crate) fn decode_explicit_alpha(block: &[u8; 8]) -> [u8; 16] {
    let bits = u64::from_le_bytes(*block);
    let mut alpha = [0u8; 16];
    for (i, value) in alpha.iter_mut().enumerate() {
        *value = ((bits >> (i * 4)) & 0xF) as u8 * 17;
    }
    alpha
}

pub(crate) fn encode_explicit_alpha(pixels: &[Color8888; 16]) -> [u8; 8] {
    let bits = pixels.iter().enumerate().fold(0u64, |bits, (i, pixel)| {
        let nibble = (pixel.a as u64 * 15 + 127) / 255;
        bits | (nibble << (i * 4))
    });
    bits.to_le_bytes()
}

/// The eight alpha levels of an interpolated alpha block.
pub(crate) fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (a, b) = (a0 as u32, a1 as u32);
    if a0 > a1 {
        [
            a0,
            a1,
            ((6 * a + b) / 7) as u8,
            ((5 * a + 2 * b) / 7) as u8,
            ((4 * a + 3 * b) / 7) as u8,
            ((3 * a + 4 * b) / 7) as u8,
            ((2 * a + 5 * b) / 7) as u8,
            ((a + 6 * b) / 7) as u8,
        ]
    } else {
        [
            a0,
            a1,
            ((4 * a + b) / 5) as u8,
            ((3 * a + 2 * b) / 5) as u8,
            ((2 * a + 3 * b) / 5) as u8,
            ((a + 4 * b) / 5) as u8,
            0,
            255,
        ]
    }
}

/// Decodes an interpolated alpha block: two endpoints then 48 bits of 3-bit selectors.
pub(crate) fn decode_interpolated_alpha(block: &[u8; 8]) -> [u8; 16] {
    let palette = alpha_palette(block[0], block[1]);
    let mut raw = [0u8; 8];
    raw[..6].copy_from_slice(&block[2..8]);
    let bits = u64::from_le_bytes(raw);
    let mut alpha = [0u8; 16];
    for (i, value) in alpha.iter_mut().enumerate() {
        *value = palette[((bits >> (i * 3)) & 7) as usize];
    }
    alpha
}

pub(crate) fn encode_interpolated_alpha(pixels: &[Color8888; 16]) -> [u8; 8] {
    let a0 = pixels.iter().map(|p| p.a).max().unwrap_or(255);
    let a1 = pixels.iter().map(|p| p.a).min().unwrap_or(255);
    let palette = alpha_palette(a0, a1);

    let bits = pixels.iter().enumerate().fold(0u64, |bits, (i, pixel)| {
        let selector = palette
            .iter()
            .enumerate()
            .min_by_key(|&(_, &level)| (level as i32 - pixel.a as i32).unsigned_abs())
            .map(|(index, _)| index as u64)
            .unwrap_or(0);
        bits | (selector << (i * 3))
    });

    let mut block = [0u8; 8];
    block[0] = a0;
    block[1] = a1;
    block[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
    block
}
