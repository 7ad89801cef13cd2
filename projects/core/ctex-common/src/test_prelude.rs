//! Common test imports and utilities for the shared texture crate
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

// Re-export commonly used alloc types for tests
pub use alloc::{format, string::String, string::ToString, vec, vec::Vec};

// External crates commonly used in tests
pub use rstest::rstest;

pub use crate::color_8888::Color8888;
pub use crate::image::RgbaImage;

/// Builds a `width` x `height` image where every pixel encodes its own position,
/// so permutation bugs show up as mismatched pixels.
pub(crate) fn gradient_image(width: u32, height: u32) -> RgbaImage {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(Color8888::new(
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) & 0xFF) as u8,
                255,
            ));
        }
    }
    RgbaImage::new(width, height, pixels).unwrap()
}

/// Sequential indices `0..len`, used to check permutations.
pub(crate) fn sequence(len: usize) -> Vec<u32> {
    (0..len as u32).collect()
}
