//! Common test imports and utilities for quantizer tests
#![allow(unused_imports)]

pub use alloc::{format, vec, vec::Vec};

// External crates commonly used in tests
pub use rstest::rstest;

pub use ctex_common::{Color8888, RgbaImage};

/// Image cycling through `colors` distinct colors.
pub(crate) fn palette_image(width: u32, height: u32, colors: usize) -> RgbaImage {
    let pixels = (0..width * height)
        .map(|i| {
            let c = i as usize % colors;
            Color8888::new(c as u8, (c * 3) as u8, (c * 7) as u8, 255)
        })
        .collect();
    RgbaImage::new(width, height, pixels).unwrap()
}

/// Deterministic pseudo-random image with many distinct colors.
pub(crate) fn noise_image(width: u32, height: u32) -> RgbaImage {
    let mut state = 0x2545_F491u32;
    let pixels = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            Color8888::from_array(state.to_le_bytes())
        })
        .collect();
    RgbaImage::new(width, height, pixels).unwrap()
}
