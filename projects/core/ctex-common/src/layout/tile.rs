//! Tiled block swizzle.
//!
//! The image is padded up to whole tiles. Tiles are stored in row-major tile order and
//! the pixels inside each tile in row-major order. Padding takes the value of the nearest
//! edge pixel when swizzling and is dropped when unswizzling.

use crate::error::{TextureError, TextureResult};
use alloc::vec::Vec;

/// Maps between row-major order and tiled order for one image and tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSwizzle {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
}

impl TileSwizzle {
    /// Creates a swizzle for a `width` x `height` image with `tile_width` x `tile_height` tiles.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::dimensions(width, height, "image dimensions must be positive"));
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(TextureError::dimensions(
                tile_width,
                tile_height,
                "tile dimensions must be positive",
            ));
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
        })
    }

    /// Width after padding to whole tiles.
    #[inline]
    pub fn stored_width(&self) -> u32 {
        self.width.div_ceil(self.tile_width) * self.tile_width
    }

    /// Height after padding to whole tiles.
    #[inline]
    pub fn stored_height(&self) -> u32 {
        self.height.div_ceil(self.tile_height) * self.tile_height
    }

    /// Number of stored values, padding included.
    #[inline]
    pub fn stored_len(&self) -> usize {
        self.stored_width() as usize * self.stored_height() as usize
    }

    /// Image coordinates of every stored value, in storage order.
    fn stored_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let tiles_x = self.stored_width() / self.tile_width;
        let tiles_y = self.stored_height() / self.tile_height;
        (0..tiles_y).flat_map(move |tile_y| {
            (0..tiles_x).flat_map(move |tile_x| {
                (0..self.tile_height).flat_map(move |py| {
                    (0..self.tile_width).map(move |px| {
                        (tile_x * self.tile_width + px, tile_y * self.tile_height + py)
                    })
                })
            })
        })
    }

    /// Reorders row-major `linear` values into tile order, padding with edge values.
    pub fn swizzle<T: Copy>(&self, linear: &[T]) -> TextureResult<Vec<T>> {
        if linear.len() != self.width as usize * self.height as usize {
            return Err(TextureError::dimensions(
                self.width,
                self.height,
                "buffer length does not match tiled size",
            ));
        }
        let mut stored = Vec::with_capacity(self.stored_len());
        for (x, y) in self.stored_positions() {
            let x = x.min(self.width - 1);
            let y = y.min(self.height - 1);
            stored.push(linear[(y * self.width + x) as usize]);
        }
        Ok(stored)
    }

    /// Reorders tiled `stored` values back into row-major order, dropping padding.
    pub fn unswizzle<T: Copy>(&self, stored: &[T]) -> TextureResult<Vec<T>> {
        if stored.len() < self.stored_len() || stored.is_empty() {
            return Err(TextureError::dimensions(
                self.width,
                self.height,
                "buffer shorter than tiled size",
            ));
        }
        let mut linear = alloc::vec![stored[0]; self.width as usize * self.height as usize];
        for ((x, y), &value) in self.stored_positions().zip(stored) {
            if x < self.width && y < self.height {
                linear[(y * self.width + x) as usize] = value;
            }
        }
        Ok(linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn tiles_are_row_major_inside_and_between() {
        let swizzle = TileSwizzle::new(4, 2, 2, 2).unwrap();
        let stored = swizzle.swizzle(&sequence(8)).unwrap();
        assert_eq!(stored, vec![0, 1, 4, 5, 2, 3, 6, 7]);
    }

    #[rstest]
    #[case(8, 8, 8, 8)]
    #[case(16, 16, 8, 4)]
    #[case(64, 32, 4, 4)]
    #[case(1024, 8, 8, 8)]
    #[case(8, 16, 4, 8)]
    fn swizzle_round_trips(
        #[case] width: u32,
        #[case] height: u32,
        #[case] tile_width: u32,
        #[case] tile_height: u32,
    ) {
        let swizzle = TileSwizzle::new(width, height, tile_width, tile_height).unwrap();
        let linear = sequence((width * height) as usize);
        let stored = swizzle.swizzle(&linear).unwrap();
        assert_eq!(stored.len(), linear.len());
        assert_eq!(swizzle.unswizzle(&stored).unwrap(), linear);
    }

    #[test]
    fn padding_repeats_edge_values() {
        let swizzle = TileSwizzle::new(3, 1, 4, 2).unwrap();
        assert_eq!(swizzle.stored_len(), 8);
        let stored = swizzle.swizzle(&[1u8, 2, 3]).unwrap();
        assert_eq!(stored, vec![1, 2, 3, 3, 1, 2, 3, 3]);
        assert_eq!(swizzle.unswizzle(&stored).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn short_stored_buffer_is_rejected() {
        let swizzle = TileSwizzle::new(8, 8, 8, 4).unwrap();
        assert!(swizzle.unswizzle(&[0u8; 63]).is_err());
    }
}
