//! Vector-quantized layout.
//!
//! The image is cut into 2x2 blocks. Each codebook entry holds the four pixels of one
//! block in twiddled order (top-left, bottom-left, top-right, bottom-right). The data
//! stream stores one codebook index per block, twiddled at half resolution. A 1x1 image
//! (the last level of a mipmap chain) is stored as a single index whose entry's first
//! pixel is the image.

use super::twiddle::Twiddler;
use crate::color_8888::Color8888;
use crate::error::{TextureError, TextureResult};
use crate::image::RgbaImage;
use alloc::vec::Vec;

/// Four pixels of one 2x2 block, in twiddled order.
pub type VqBlock = [Color8888; 4];

/// Block grid size of a `width` x `height` image.
#[inline]
pub fn block_dimensions(width: u32, height: u32) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}

/// Number of codebook indices a `width` x `height` image stores.
#[inline]
pub fn index_count(width: u32, height: u32) -> usize {
    let (bw, bh) = block_dimensions(width, height);
    bw as usize * bh as usize
}

/// Cuts `image` into blocks, in row-major block order.
pub fn split_blocks(image: &RgbaImage) -> TextureResult<Vec<VqBlock>> {
    let (width, height) = (image.width(), image.height());
    if width == 1 && height == 1 {
        return Ok(alloc::vec![[image.pixels()[0]; 4]]);
    }
    if width % 2 != 0 || height % 2 != 0 {
        return Err(TextureError::dimensions(width, height, "vector quantization needs even sides"));
    }

    let (bw, bh) = block_dimensions(width, height);
    let mut blocks = Vec::with_capacity(bw as usize * bh as usize);
    for by in 0..bh {
        for bx in 0..bw {
            let (x, y) = (bx * 2, by * 2);
            blocks.push([
                image.pixel_clamped(x, y),
                image.pixel_clamped(x, y + 1),
                image.pixel_clamped(x + 1, y),
                image.pixel_clamped(x + 1, y + 1),
            ]);
        }
    }
    Ok(blocks)
}

/// Reassembles an image from row-major blocks. Inverse of [`split_blocks`].
pub fn join_blocks(width: u32, height: u32, blocks: &[VqBlock]) -> TextureResult<RgbaImage> {
    if blocks.len() != index_count(width, height) {
        return Err(TextureError::dimensions(width, height, "block count does not match size"));
    }
    if width == 1 && height == 1 {
        return RgbaImage::new(1, 1, alloc::vec![blocks[0][0]]);
    }

    let (bw, _) = block_dimensions(width, height);
    let mut pixels = alloc::vec![Color8888::TRANSPARENT; width as usize * height as usize];
    for (i, block) in blocks.iter().enumerate() {
        let x = (i as u32 % bw) * 2;
        let y = (i as u32 / bw) * 2;
        // Twiddled inner order: (0,0), (0,1), (1,0), (1,1).
        for (&pixel, (dx, dy)) in block.iter().zip([(0, 0), (0, 1), (1, 0), (1, 1)]) {
            let (px, py) = (x + dx, y + dy);
            if px < width && py < height {
                pixels[py as usize * width as usize + px as usize] = pixel;
            }
        }
    }
    RgbaImage::new(width, height, pixels)
}

/// Decodes stored (twiddled) indices through `codebook`.
///
/// # Errors
///
/// [`TextureError::PaletteIndexOutOfRange`] if an index has no codebook entry.
pub fn decode(
    codebook: &[VqBlock],
    stored_indices: &[u8],
    width: u32,
    height: u32,
) -> TextureResult<RgbaImage> {
    let count = index_count(width, height);
    if stored_indices.len() < count {
        return Err(crate::error::FormatMismatch::Truncated {
            required: count,
            actual: stored_indices.len(),
        }
        .into());
    }

    let (bw, bh) = block_dimensions(width, height);
    let indices = Twiddler::rectangle(bw, bh)?.untwiddle(&stored_indices[..count])?;
    let blocks = indices
        .iter()
        .map(|&index| {
            codebook
                .get(index as usize)
                .copied()
                .ok_or(TextureError::PaletteIndexOutOfRange {
                    index: index as usize,
                    entries: codebook.len(),
                })
        })
        .collect::<TextureResult<Vec<_>>>()?;
    join_blocks(width, height, &blocks)
}

/// Twiddles row-major block indices into stored order.
pub fn store_indices(block_indices: &[u8], width: u32, height: u32) -> TextureResult<Vec<u8>> {
    let (bw, bh) = block_dimensions(width, height);
    Twiddler::rectangle(bw, bh)?.twiddle(block_indices)
}
