//! GVR format constants
#![allow(dead_code)]

use ctex_common::layout::ShapeConstraint;

/// Magic of the texture header.
pub(crate) const GVRT_MAGIC: [u8; 4] = *b"GVRT";

/// Size of the optional `GBIX`/`GCIX` header.
pub(crate) const GLOBAL_INDEX_HEADER_SIZE: usize = 0x10;
pub(crate) const GLOBAL_INDEX_LENGTH_OFFSET: usize = 0x04;
pub(crate) const GLOBAL_INDEX_VALUE_OFFSET: usize = 0x08;
/// Value of the global index header's length field.
pub(crate) const GLOBAL_INDEX_LENGTH: u32 = 8;

/// Size of the `GVRT` header.
pub(crate) const GVRT_HEADER_SIZE: usize = 0x10;
pub(crate) const GVRT_LENGTH_OFFSET: usize = 0x04;
pub(crate) const GVRT_FORMAT_OFFSET: usize = 0x0A;
pub(crate) const GVRT_DATA_FORMAT_OFFSET: usize = 0x0B;
pub(crate) const GVRT_WIDTH_OFFSET: usize = 0x0C;
pub(crate) const GVRT_HEIGHT_OFFSET: usize = 0x0E;

/// Bytes between the end of the length field and the payload. The declared length
/// counts them.
pub(crate) const GVRT_LENGTH_BIAS: usize = 8;

/// Smallest side a GVR texture may have.
pub(crate) const MIN_SIDE: u32 = 8;
/// Largest side a GVR texture may have.
pub(crate) const MAX_SIDE: u32 = 1024;

/// Sides every GVR data format accepts: powers of two in `MIN_SIDE..=MAX_SIDE`.
pub(crate) const SHAPE: ShapeConstraint = ShapeConstraint {
    power_of_two: true,
    square: false,
    min: MIN_SIDE,
    max: MAX_SIDE,
};

/// Bytes of one ARGB8888 tile: 16 AR pairs then 16 GB pairs.
pub(crate) const ARGB8888_TILE_BYTES: usize = 64;
/// Bytes of one DXT1 tile: four GameCube-layout blocks.
pub(crate) const DXT1_TILE_BYTES: usize = 32;
