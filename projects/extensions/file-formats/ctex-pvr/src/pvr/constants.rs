//! PVR format constants
#![allow(dead_code)]

/// Magic of the texture header.
pub(crate) const PVRT_MAGIC: [u8; 4] = *b"PVRT";

/// Size of the magic and length field of the optional `GBIX`/`GCIX` header. Its length
/// field counts the bytes after it.
pub(crate) const GLOBAL_INDEX_PREFIX_SIZE: usize = 0x08;
pub(crate) const GLOBAL_INDEX_LENGTH_OFFSET: usize = 0x04;
pub(crate) const GLOBAL_INDEX_VALUE_OFFSET: usize = 0x08;
/// Length field written for the global index header.
pub(crate) const GLOBAL_INDEX_LENGTH: u32 = 8;

/// Size of the `PVRT` header.
pub(crate) const PVRT_HEADER_SIZE: usize = 0x10;
pub(crate) const PVRT_LENGTH_OFFSET: usize = 0x04;
pub(crate) const PVRT_PIXEL_FORMAT_OFFSET: usize = 0x08;
pub(crate) const PVRT_DATA_FORMAT_OFFSET: usize = 0x09;
pub(crate) const PVRT_WIDTH_OFFSET: usize = 0x0C;
pub(crate) const PVRT_HEIGHT_OFFSET: usize = 0x0E;

/// Bytes between the end of the length field and the payload.
pub(crate) const PVRT_LENGTH_BIAS: usize = 8;
