//! Spatial layouts: how pixel positions map between row-major order and on-disk order.
//!
//! Each mapper is a pure index permutation, independent of the pixel codec:
//!
//! - [`twiddle`]: bit-interleaved (Morton) order for power-of-two squares, and square
//!   sub-blocks for rectangles.
//! - [`tile`]: fixed-size tiles stored in row-major tile order.
//! - [`vq`]: 2x2 blocks addressed through a codebook, with twiddled block indices.

pub mod tile;
pub mod twiddle;
pub mod vq;

use crate::block::DxtVariant;
use crate::error::{TextureError, TextureResult};

/// Largest side length any supported layout accepts.
pub const MAX_TEXTURE_SIDE: u32 = 1024;

/// Width/height rules for a [`DataLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeConstraint {
    /// Both sides must be powers of two.
    pub power_of_two: bool,
    /// Width must equal height.
    pub square: bool,
    /// Smallest allowed side.
    pub min: u32,
    /// Largest allowed side.
    pub max: u32,
}

impl ShapeConstraint {
    /// Copy of this constraint with different side bounds.
    #[inline]
    pub const fn with_bounds(self, min: u32, max: u32) -> Self {
        Self { min, max, ..self }
    }

    /// Checks `width` x `height` against this constraint.
    pub fn validate(&self, width: u32, height: u32) -> TextureResult<()> {
        if width < self.min || height < self.min {
            return Err(TextureError::dimensions(width, height, "side below layout minimum"));
        }
        if width > self.max || height > self.max {
            return Err(TextureError::dimensions(width, height, "side above layout maximum"));
        }
        if self.power_of_two && !(width.is_power_of_two() && height.is_power_of_two()) {
            return Err(TextureError::dimensions(
                width,
                height,
                "layout requires power-of-two sides",
            ));
        }
        if self.square && width != height {
            return Err(TextureError::dimensions(width, height, "layout requires a square"));
        }
        Ok(())
    }
}

/// Spatial addressing of a texture's pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLayout {
    /// Row-major pixels.
    Linear,
    /// Twiddled square.
    SquareTwiddled,
    /// Twiddled square followed by a twiddled mipmap chain.
    SquareTwiddledWithMipmaps,
    /// Rectangle twiddled in square sub-blocks.
    RectangleTwiddled,
    /// Fixed-size tiles in row-major tile order.
    TiledBlock {
        /// Tile width in pixels.
        tile_width: u8,
        /// Tile height in pixels.
        tile_height: u8,
    },
    /// 2x2 blocks through a codebook.
    VectorQuantized,
    /// 2x2 blocks through a codebook, with a mipmap chain.
    VectorQuantizedWithMipmaps,
    /// 4x4 DXT blocks.
    CompressedBlock(DxtVariant),
}

impl DataLayout {
    /// Whether the layout carries a mipmap chain by definition.
    #[inline]
    pub const fn has_mipmaps(self) -> bool {
        matches!(
            self,
            DataLayout::SquareTwiddledWithMipmaps | DataLayout::VectorQuantizedWithMipmaps
        )
    }

    /// Shape rules of the layout. Containers may tighten the bounds further.
    pub const fn shape(self) -> ShapeConstraint {
        match self {
            DataLayout::Linear
            | DataLayout::TiledBlock { .. }
            | DataLayout::CompressedBlock(_) => ShapeConstraint {
                power_of_two: false,
                square: false,
                min: 1,
                max: u16::MAX as u32,
            },
            DataLayout::SquareTwiddled | DataLayout::SquareTwiddledWithMipmaps => {
                ShapeConstraint {
                    power_of_two: true,
                    square: true,
                    min: 1,
                    max: MAX_TEXTURE_SIDE,
                }
            }
            DataLayout::RectangleTwiddled => ShapeConstraint {
                power_of_two: true,
                square: false,
                min: 1,
                max: MAX_TEXTURE_SIDE,
            },
            DataLayout::VectorQuantized | DataLayout::VectorQuantizedWithMipmaps => {
                ShapeConstraint {
                    power_of_two: true,
                    square: true,
                    min: 2,
                    max: MAX_TEXTURE_SIDE,
                }
            }
        }
    }

    /// Checks `width` x `height` against [`DataLayout::shape`].
    #[inline]
    pub fn validate(self, width: u32, height: u32) -> TextureResult<()> {
        self.shape().validate(width, height)
    }
}
