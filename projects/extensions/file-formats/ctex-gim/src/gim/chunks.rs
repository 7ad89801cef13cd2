//! The GIM chunk stream.
//!
//! Every chunk starts with a 16-byte little-endian header: `u16` kind, `u16` reserved,
//! `i32` length (header included), `u32` next offset and `u32` body offset. The walk
//! starts right after the file signature. Container chunks (end-of-file and
//! metadata-offset markers) are entered by skipping only their header; every other
//! chunk is skipped whole.

use super::constants::*;
use alloc::vec::Vec;
use ctex_common::{ChunkFault, TextureError, TextureResult};
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};
use likely_stable::unlikely;

/// Known chunk kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ChunkKind {
    /// Root chunk; its length declares where the file ends.
    EndOfFile = 0x02,
    /// Picture chunk; its end is where the metadata chunk begins.
    MetadataOffset = 0x03,
    /// Image block.
    Texture = 0x04,
    /// Palette block.
    Palette = 0x05,
    /// Free-text metadata.
    Metadata = 0xFF,
}

impl ChunkKind {
    /// Recognizes a chunk kind; unknown kinds are skipped by the walk.
    #[inline]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0x02 => Some(ChunkKind::EndOfFile),
            0x03 => Some(ChunkKind::MetadataOffset),
            0x04 => Some(ChunkKind::Texture),
            0x05 => Some(ChunkKind::Palette),
            0xFF => Some(ChunkKind::Metadata),
            _ => None,
        }
    }
}

/// A chunk header as stored, with its absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Offset of the header in the file.
    pub offset: usize,
    /// Raw kind.
    pub kind: u16,
    /// Length of the chunk, header included. Always positive.
    pub length: usize,
    /// Stored next offset.
    pub next_offset: u32,
    /// Stored body offset.
    pub body_offset: u32,
}

impl ChunkHeader {
    /// Bytes of the chunk after its header.
    #[inline]
    pub fn body<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        data.get(self.offset + CHUNK_HEADER_SIZE..self.offset + self.length)
            .unwrap_or_default()
    }

    /// Offset one past the chunk.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Where the walk found each chunk of interest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMap {
    /// Offset declared by the end-of-file chunk.
    pub end_of_file: usize,
    /// Offset recorded by the metadata-offset chunk.
    pub metadata_offset: Option<usize>,
    /// First image block.
    pub texture: Option<ChunkHeader>,
    /// First palette block.
    pub palette: Option<ChunkHeader>,
    /// First metadata chunk.
    pub metadata: Option<ChunkHeader>,
}

#[inline]
fn corrupt(offset: usize, fault: ChunkFault) -> TextureError {
    TextureError::CorruptChunk { offset, fault }
}

/// Reads the chunk header at `offset`, rejecting lengths that are not positive or that
/// run past the end of `data`.
fn read_chunk_header(data: &[u8], offset: usize) -> TextureResult<ChunkHeader> {
    let remaining = data.len().saturating_sub(offset);
    if unlikely(remaining < CHUNK_HEADER_SIZE) {
        return Err(corrupt(
            offset,
            ChunkFault::OutOfRange {
                length: CHUNK_HEADER_SIZE,
                remaining,
            },
        ));
    }

    // SAFETY: remaining >= CHUNK_HEADER_SIZE (16), so every field below is in bounds.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr().add(offset)) };
    let kind = unsafe { reader.read_u16_at(CHUNK_KIND_OFFSET as isize) };
    let length = unsafe { reader.read_u32_at(CHUNK_LENGTH_OFFSET as isize) } as i32;
    let next_offset = unsafe { reader.read_u32_at(CHUNK_NEXT_OFFSET as isize) };
    let body_offset = unsafe { reader.read_u32_at(CHUNK_BODY_OFFSET as isize) };

    if unlikely(length <= 0) {
        return Err(corrupt(offset, ChunkFault::NonPositiveLength(length)));
    }
    let length = length as usize;
    if unlikely(length > remaining) {
        return Err(corrupt(offset, ChunkFault::OutOfRange { length, remaining }));
    }

    Ok(ChunkHeader {
        offset,
        kind,
        length,
        next_offset,
        body_offset,
    })
}

/// Walks the chunk stream of a GIM file.
///
/// Every step advances by at least one byte and no chunk may extend past the buffer, so
/// the walk terminates without reading out of bounds on any input.
///
/// # Errors
///
/// [`TextureError::CorruptChunk`] for a non-positive or out-of-range chunk length, a
/// missing end-of-file chunk, or a walk that does not finish exactly at the declared end.
pub fn walk_chunks(data: &[u8]) -> TextureResult<ChunkMap> {
    let mut map = ChunkMap::default();
    let mut end_of_file = None;
    let mut end = data.len();
    let mut cursor = FILE_HEADER_SIZE;

    while cursor < end {
        let chunk = read_chunk_header(data, cursor)?;
        tracing::trace!(
            offset = cursor,
            kind = chunk.kind,
            length = chunk.length,
            "GIM chunk"
        );
        match ChunkKind::from_code(chunk.kind) {
            Some(ChunkKind::EndOfFile) => {
                end = chunk.end();
                end_of_file = Some(end);
                cursor += CHUNK_HEADER_SIZE;
            }
            Some(ChunkKind::MetadataOffset) => {
                map.metadata_offset = Some(chunk.end());
                cursor += CHUNK_HEADER_SIZE;
            }
            Some(ChunkKind::Texture) => {
                map.texture.get_or_insert(chunk);
                cursor = chunk.end();
            }
            Some(ChunkKind::Palette) => {
                map.palette.get_or_insert(chunk);
                cursor = chunk.end();
            }
            Some(ChunkKind::Metadata) => {
                map.metadata.get_or_insert(chunk);
                cursor = chunk.end();
            }
            None => cursor = chunk.end(),
        }
    }

    let Some(declared) = end_of_file else {
        return Err(corrupt(
            FILE_HEADER_SIZE,
            ChunkFault::MissingChunk(ChunkKind::EndOfFile as u16),
        ));
    };
    if unlikely(cursor != declared) {
        return Err(corrupt(
            cursor,
            ChunkFault::EofMismatch {
                declared,
                actual: cursor,
            },
        ));
    }
    if data.len() > declared {
        tracing::warn!(
            trailing = data.len() - declared,
            "ignoring bytes after GIM end-of-file chunk"
        );
    }
    map.end_of_file = declared;
    Ok(map)
}

/// Appends a chunk whose body is entered by the walk (end-of-file, metadata-offset).
pub(crate) fn write_container_chunk(kind: ChunkKind, children: &[u8], out: &mut Vec<u8>) {
    write_chunk_header(
        kind,
        CHUNK_HEADER_SIZE + children.len(),
        CHUNK_HEADER_SIZE as u32,
        out,
    );
    out.extend_from_slice(children);
}

/// Appends a chunk the walk skips whole.
pub(crate) fn write_leaf_chunk(kind: ChunkKind, body: &[u8], out: &mut Vec<u8>) {
    let length = CHUNK_HEADER_SIZE + body.len();
    write_chunk_header(kind, length, length as u32, out);
    out.extend_from_slice(body);
}

fn write_chunk_header(kind: ChunkKind, length: usize, next_offset: u32, out: &mut Vec<u8>) {
    let mut header = [0u8; CHUNK_HEADER_SIZE];
    // SAFETY: every offset plus its field size lies within the 16-byte array.
    unsafe {
        let mut writer = LittleEndianWriter::new(header.as_mut_ptr());
        writer.write_u16_at(kind as u16, CHUNK_KIND_OFFSET as isize);
        writer.write_u32_at(length as u32, CHUNK_LENGTH_OFFSET as isize);
        writer.write_u32_at(next_offset, CHUNK_NEXT_OFFSET as isize);
        writer.write_u32_at(CHUNK_HEADER_SIZE as u32, CHUNK_BODY_OFFSET as isize);
    }
    out.extend_from_slice(&header);
}
