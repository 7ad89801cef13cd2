//! Twiddled (bit-interleaved) addressing.
//!
//! In a twiddled square of side `n`, pixel `(x, y)` is stored at
//! `(spread(x) << 1) | spread(y)`, where `spread` moves bit `k` of a coordinate to bit
//! `2k`. Rectangles are split into squares of side `min(width, height)`, laid out
//! left-to-right then top-to-bottom, each twiddled on its own.

use crate::error::{TextureError, TextureResult};
use alloc::vec;
use alloc::vec::Vec;

/// Precomputed bit-spread values for one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwiddleMap {
    values: Vec<u32>,
}

impl TwiddleMap {
    /// Builds the map for coordinates `0..side`.
    pub fn new(side: u32) -> Self {
        let values = (0..side).map(spread_bits).collect();
        Self { values }
    }

    /// Bit-spread value of `coordinate`.
    #[inline(always)]
    pub fn get(&self, coordinate: u32) -> u32 {
        self.values[coordinate as usize]
    }

    /// Number of coordinates covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map covers no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Moves bit `k` of `value` to bit `2k`.
#[inline]
const fn spread_bits(value: u32) -> u32 {
    let mut result = 0;
    let mut bit = 0;
    while bit < 16 {
        result |= ((value >> bit) & 1) << (bit * 2);
        bit += 1;
    }
    result
}

/// Maps between row-major order and twiddled order for one texture size.
#[derive(Debug, Clone)]
pub struct Twiddler {
    width: u32,
    height: u32,
    block: u32,
    map: TwiddleMap,
}

impl Twiddler {
    /// Twiddler for a power-of-two square.
    pub fn square(side: u32) -> TextureResult<Self> {
        if side != 0 && !side.is_power_of_two() {
            return Err(TextureError::dimensions(side, side, "twiddling needs power-of-two sides"));
        }
        Self::rectangle(side, side)
    }

    /// Twiddler for a power-of-two rectangle, twiddled in square sub-blocks.
    pub fn rectangle(width: u32, height: u32) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::dimensions(width, height, "image dimensions must be positive"));
        }
        if !width.is_power_of_two() || !height.is_power_of_two() {
            return Err(TextureError::dimensions(
                width,
                height,
                "twiddling needs power-of-two sides",
            ));
        }
        let block = width.min(height);
        Ok(Self {
            width,
            height,
            block,
            map: TwiddleMap::new(block),
        })
    }

    /// Number of pixels covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the twiddler covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored offset of pixel `(x, y)`.
    #[inline]
    pub fn stored_index(&self, x: u32, y: u32) -> usize {
        let block = self.block;
        let blocks_per_row = self.width / block;
        let block_index = (y / block) * blocks_per_row + x / block;
        let inner = (self.map.get(x % block) << 1) | self.map.get(y % block);
        block_index as usize * (block * block) as usize + inner as usize
    }

    /// Reorders row-major `linear` values into twiddled order.
    pub fn twiddle<T: Copy>(&self, linear: &[T]) -> TextureResult<Vec<T>> {
        self.check_len(linear.len())?;
        let mut stored = vec![linear[0]; linear.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                stored[self.stored_index(x, y)] = linear[(y * self.width + x) as usize];
            }
        }
        Ok(stored)
    }

    /// Reorders twiddled `stored` values back into row-major order.
    pub fn untwiddle<T: Copy>(&self, stored: &[T]) -> TextureResult<Vec<T>> {
        self.check_len(stored.len())?;
        let mut linear = Vec::with_capacity(stored.len());
        for y in 0..self.height {
            for x in 0..self.width {
                linear.push(stored[self.stored_index(x, y)]);
            }
        }
        Ok(linear)
    }

    fn check_len(&self, len: usize) -> TextureResult<()> {
        if len != self.len() {
            return Err(TextureError::dimensions(
                self.width,
                self.height,
                "buffer length does not match twiddled size",
            ));
        }
        Ok(())
    }
}
