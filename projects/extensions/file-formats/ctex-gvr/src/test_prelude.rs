//! Common test imports and utilities for GVR tests
#![allow(unused_imports)]

pub use alloc::{vec, vec::Vec};

// External crates commonly used in tests
pub use rstest::rstest;

pub use ctex_common::{Color8888, RgbaImage};

/// Colors every 16-bit palette format stores exactly.
pub(crate) const EXACT_COLORS: [Color8888; 8] = [
    Color8888::new(0, 0, 0, 255),
    Color8888::new(255, 255, 255, 255),
    Color8888::new(255, 0, 0, 255),
    Color8888::new(0, 255, 0, 255),
    Color8888::new(0, 0, 255, 255),
    Color8888::new(255, 255, 0, 255),
    Color8888::new(0, 255, 255, 255),
    Color8888::new(255, 0, 255, 255),
];

/// Image cycling through the first `colors` of [`EXACT_COLORS`].
pub(crate) fn palette_image(width: u32, height: u32, colors: usize) -> RgbaImage {
    let pixels = (0..(width * height) as usize)
        .map(|i| EXACT_COLORS[(i / 3 + i % 5) % colors])
        .collect();
    RgbaImage::new(width, height, pixels).unwrap()
}

/// Opaque image where every pixel encodes its own position.
pub(crate) fn gradient_image(width: u32, height: u32) -> RgbaImage {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Color8888::new((x * 255 / width) as u8, (y * 255 / height) as u8, (x ^ y) as u8, 255)
            })
        })
        .collect();
    RgbaImage::new(width, height, pixels).unwrap()
}
