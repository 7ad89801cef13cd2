//! GIM format constants

pub(crate) const GIM_SIGNATURE: [u8; 12] = *b"MIG.00.1PSP\0";
pub(crate) const FILE_HEADER_SIZE: usize = 0x10;

pub(crate) const CHUNK_HEADER_SIZE: usize = 0x10;
pub(crate) const CHUNK_KIND_OFFSET: usize = 0x00;
pub(crate) const CHUNK_LENGTH_OFFSET: usize = 0x04;
pub(crate) const CHUNK_NEXT_OFFSET: usize = 0x08;
pub(crate) const CHUNK_BODY_OFFSET: usize = 0x0C;

/// Image and palette blocks.
pub(crate) const BLOCK_HEADER_SIZE: usize = 0x40;
pub(crate) const BLOCK_DECLARED_SIZE: u16 = 0x30;
pub(crate) const BLOCK_FORMAT_OFFSET: usize = 0x04;
pub(crate) const BLOCK_ORDER_OFFSET: usize = 0x06;
pub(crate) const BLOCK_WIDTH_OFFSET: usize = 0x08;
pub(crate) const BLOCK_HEIGHT_OFFSET: usize = 0x0A;
pub(crate) const BLOCK_BPP_OFFSET: usize = 0x0C;
pub(crate) const BLOCK_PITCH_ALIGN_OFFSET: usize = 0x0E;
pub(crate) const BLOCK_HEIGHT_ALIGN_OFFSET: usize = 0x10;
pub(crate) const BLOCK_DATA_OFFSET: usize = 0x1C;
pub(crate) const BLOCK_DATA_END_OFFSET: usize = 0x20;

/// Swizzle tiles are 16 bytes wide and 8 rows tall; rows are padded to match.
pub(crate) const PITCH_ALIGN: u32 = 16;
pub(crate) const HEIGHT_ALIGN: u32 = 8;

/// Pixel order value of swizzled payloads.
pub(crate) const ORDER_SWIZZLED: u16 = 1;
