//! Parsing of the GIM chunk tree into image and palette blocks.

use super::chunks::{walk_chunks, ChunkHeader, ChunkKind, ChunkMap};
use super::constants::*;
use super::formats::{GimPaletteFormat, GimPixelFormat};
use super::metadata::read_metadata;
use alloc::vec::Vec;
use core::ops::Range;
use ctex_common::error::require_len;
use ctex_common::{
    ChunkFault, ContainerKind, FormatMismatch, TextureError, TextureInfo, TextureMetadata,
    TextureResult,
};
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};
use likely_stable::unlikely;

/// An image or palette block: the 0x40-byte header that opens the chunk body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GimBlock {
    /// Raw pixel format (image block) or entry format (palette block).
    pub format_code: u16,
    /// Pixel order; `1` means the payload is swizzled.
    pub pixel_order: u16,
    /// Width in pixels, or entry count for a palette.
    pub width: u16,
    /// Height in pixels; `1` for a palette.
    pub height: u16,
    /// Bits per pixel or per entry.
    pub bits_per_pixel: u16,
    /// Absolute position of the payload in the file.
    pub payload: Range<usize>,
}

impl GimBlock {
    /// Parses the block at the start of `chunk`'s body.
    ///
    /// # Errors
    ///
    /// [`TextureError::InvalidFormat`] if the header or the payload it points at does not
    /// fit the chunk.
    pub fn parse(data: &[u8], chunk: &ChunkHeader) -> TextureResult<Self> {
        let body = chunk.body(data);
        require_len(body, BLOCK_HEADER_SIZE)?;

        // SAFETY: body.len() >= BLOCK_HEADER_SIZE (64), so every field below is in bounds.
        let mut reader = unsafe { LittleEndianReader::new(body.as_ptr()) };
        let format_code = unsafe { reader.read_u16_at(BLOCK_FORMAT_OFFSET as isize) };
        let pixel_order = unsafe { reader.read_u16_at(BLOCK_ORDER_OFFSET as isize) };
        let width = unsafe { reader.read_u16_at(BLOCK_WIDTH_OFFSET as isize) };
        let height = unsafe { reader.read_u16_at(BLOCK_HEIGHT_OFFSET as isize) };
        let bits_per_pixel = unsafe { reader.read_u16_at(BLOCK_BPP_OFFSET as isize) };
        let start = unsafe { reader.read_u32_at(BLOCK_DATA_OFFSET as isize) } as usize;
        let end = unsafe { reader.read_u32_at(BLOCK_DATA_END_OFFSET as isize) } as usize;

        if unlikely(start < BLOCK_HEADER_SIZE || start > end || end > body.len()) {
            return Err(FormatMismatch::LengthMismatch {
                declared: end,
                actual: body.len(),
            }
            .into());
        }

        let base = chunk.offset + CHUNK_HEADER_SIZE;
        Ok(Self {
            format_code,
            pixel_order,
            width,
            height,
            bits_per_pixel,
            payload: base + start..base + end,
        })
    }

    /// Whether the payload is stored in 16-byte by 8-row tiles.
    #[inline]
    pub fn is_swizzled(&self) -> bool {
        self.pixel_order == ORDER_SWIZZLED
    }

    /// The payload bytes.
    #[inline]
    pub fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.payload.clone()]
    }

    /// Appends the block header followed by `payload` to `out`.
    pub(crate) fn write(&self, payload: &[u8], out: &mut Vec<u8>) {
        let mut header = [0u8; BLOCK_HEADER_SIZE];
        // SAFETY: every offset plus its field size lies within the 64-byte array.
        unsafe {
            let mut writer = LittleEndianWriter::new(header.as_mut_ptr());
            writer.write_u16_at(BLOCK_DECLARED_SIZE, 0x00);
            writer.write_u16_at(self.format_code, BLOCK_FORMAT_OFFSET as isize);
            writer.write_u16_at(self.pixel_order, BLOCK_ORDER_OFFSET as isize);
            writer.write_u16_at(self.width, BLOCK_WIDTH_OFFSET as isize);
            writer.write_u16_at(self.height, BLOCK_HEIGHT_OFFSET as isize);
            writer.write_u16_at(self.bits_per_pixel, BLOCK_BPP_OFFSET as isize);
            writer.write_u16_at(PITCH_ALIGN as u16, BLOCK_PITCH_ALIGN_OFFSET as isize);
            writer.write_u16_at(HEIGHT_ALIGN as u16, BLOCK_HEIGHT_ALIGN_OFFSET as isize);
            // Plane and frame fields, fixed for single-level, single-frame images.
            writer.write_u16_at(2, 0x12);
            writer.write_u32_at(BLOCK_DECLARED_SIZE as u32, 0x18);
            writer.write_u32_at(BLOCK_HEADER_SIZE as u32, BLOCK_DATA_OFFSET as isize);
            writer.write_u32_at(
                (BLOCK_HEADER_SIZE + payload.len()) as u32,
                BLOCK_DATA_END_OFFSET as isize,
            );
            writer.write_u16_at(1, 0x28);
            writer.write_u16_at(1, 0x2A);
            writer.write_u16_at(3, 0x2C);
            writer.write_u16_at(1, 0x2E);
            writer.write_u32_at(BLOCK_HEADER_SIZE as u32, 0x30);
        }
        out.extend_from_slice(&header);
        out.extend_from_slice(payload);
    }
}

/// The parsed structure of a GIM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GimHeader {
    /// Chunk positions found by the walk.
    pub chunks: ChunkMap,
    /// The image block.
    pub image: GimBlock,
    /// The palette block, if present.
    pub palette: Option<GimBlock>,
    /// Free-text metadata, if present.
    pub metadata: Option<TextureMetadata>,
}

impl GimHeader {
    /// The image's pixel format, or [`UnsupportedCodec`] for an unknown code.
    ///
    /// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
    #[inline]
    pub fn pixel_format(&self) -> TextureResult<GimPixelFormat> {
        GimPixelFormat::try_from(self.image.format_code)
    }

    /// The palette's entry format, if there is a palette block.
    #[inline]
    pub fn palette_format(&self) -> Option<TextureResult<GimPaletteFormat>> {
        self.palette
            .as_ref()
            .map(|block| GimPaletteFormat::try_from(block.format_code))
    }

    /// Header information with every code resolved that can be.
    pub fn info(&self) -> TextureInfo {
        let image = &self.image;
        let mut info = TextureInfo::new(ContainerKind::Gim, image.width as u32, image.height as u32);
        info.pixel_format_code = image.format_code;
        info.data_format_code = image.pixel_order;
        info.metadata = self.metadata.clone();

        let Ok(format) = self.pixel_format() else {
            return info;
        };
        info.pixel_format = format.pixel_format();
        info.data_layout = Some(format.layout(image.is_swizzled()));
        if format.is_indexed() {
            info.palette_format_code = self.palette.as_ref().map(|block| block.format_code);
            info.palette_format = self
                .palette_format()
                .and_then(Result::ok)
                .map(GimPaletteFormat::pixel_format);
            info.has_embedded_palette = self.palette.is_some();
            info.needs_external_palette = self.palette.is_none();
        }
        info
    }
}

/// Parses the chunk structure, image block, palette block and metadata of `data`.
///
/// # Errors
///
/// - [`FormatMismatch::Truncated`] / [`FormatMismatch::BadMagic`] for a missing signature.
/// - [`TextureError::CorruptChunk`] from [`walk_chunks`], or when there is no image chunk.
/// - [`FormatMismatch::LengthMismatch`] if a block's payload does not fit its chunk.
pub fn parse_gim(data: &[u8]) -> TextureResult<GimHeader> {
    require_len(data, FILE_HEADER_SIZE)?;
    if unlikely(data[..GIM_SIGNATURE.len()] != GIM_SIGNATURE) {
        return Err(FormatMismatch::BadMagic.into());
    }

    let chunks = walk_chunks(data)?;
    let Some(texture) = chunks.texture else {
        return Err(TextureError::CorruptChunk {
            offset: FILE_HEADER_SIZE,
            fault: ChunkFault::MissingChunk(ChunkKind::Texture as u16),
        });
    };
    let image = GimBlock::parse(data, &texture)?;
    let palette = chunks
        .palette
        .map(|chunk| GimBlock::parse(data, &chunk))
        .transpose()?;
    let metadata = chunks.metadata.map(|chunk| read_metadata(chunk.body(data)));

    tracing::debug!(
        width = image.width,
        height = image.height,
        format = image.format_code,
        swizzled = image.is_swizzled(),
        palette = palette.is_some(),
        "parsed GIM header"
    );
    Ok(GimHeader {
        chunks,
        image,
        palette,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gim::chunks::{write_container_chunk, write_leaf_chunk};
    use crate::test_prelude::*;
    use ctex_common::{DataLayout, PixelFormat};

    fn block(format_code: u16, width: u16, height: u16) -> GimBlock {
        GimBlock {
            format_code,
            pixel_order: ORDER_SWIZZLED,
            width,
            height,
            bits_per_pixel: 32,
            payload: 0..0,
        }
    }

    fn file(image: &GimBlock, payload: &[u8], palette: Option<(&GimBlock, &[u8])>) -> Vec<u8> {
        let mut picture = Vec::new();
        let mut body = Vec::new();
        image.write(payload, &mut body);
        write_leaf_chunk(ChunkKind::Texture, &body, &mut picture);
        if let Some((palette, entries)) = palette {
            let mut body = Vec::new();
            palette.write(entries, &mut body);
            write_leaf_chunk(ChunkKind::Palette, &body, &mut picture);
        }
        let mut root = Vec::new();
        write_container_chunk(ChunkKind::MetadataOffset, &picture, &mut root);

        let mut out = GIM_SIGNATURE.to_vec();
        out.extend_from_slice(&[0; 4]);
        write_container_chunk(ChunkKind::EndOfFile, &root, &mut out);
        out
    }

    #[test]
    fn block_header_layout() {
        let mut out = Vec::new();
        block(0x03, 8, 2).write(&[7; 64], &mut out);
        assert_eq!(&out[0x00..0x02], &[0x30, 0]);
        assert_eq!(&out[0x04..0x06], &[0x03, 0]);
        assert_eq!(&out[0x06..0x08], &[0x01, 0]);
        assert_eq!(&out[0x08..0x0C], &[8, 0, 2, 0]);
        assert_eq!(&out[0x0E..0x12], &[16, 0, 8, 0]);
        assert_eq!(&out[0x1C..0x24], &[0x40, 0, 0, 0, 0x80, 0, 0, 0]);
        assert_eq!(&out[0x30..0x34], &[0x40, 0, 0, 0]);
        assert_eq!(out.len(), 0x40 + 64);
    }

    #[test]
    fn image_block_is_located() {
        let data = file(&block(0x03, 4, 4), &[5; 64], None);
        let header = parse_gim(&data).unwrap();
        assert_eq!(header.image.width, 4);
        assert_eq!(header.image.payload(&data), &[5; 64]);
        assert!(header.palette.is_none());
        assert!(header.metadata.is_none());

        let info = header.info();
        assert_eq!(info.pixel_format, Some(PixelFormat::Abgr8888));
        assert_eq!(
            info.data_layout,
            Some(DataLayout::TiledBlock {
                tile_width: 4,
                tile_height: 8
            })
        );
    }

    #[test]
    fn indexed_info_reports_palette() {
        let palette = GimBlock {
            bits_per_pixel: 16,
            ..block(0x00, 16, 1)
        };
        let data = file(&block(0x04, 8, 8), &[0; 128], Some((&palette, &[0; 32])));
        let info = parse_gim(&data).unwrap().info();
        assert_eq!(info.pixel_format, Some(PixelFormat::Index4));
        assert_eq!(info.palette_format, Some(PixelFormat::Bgr565));
        assert_eq!(info.palette_format_code, Some(0));
        assert!(info.has_embedded_palette);
        assert!(!info.needs_external_palette);
    }

    #[test]
    fn index16_keeps_info_readable() {
        let data = file(&block(0x06, 8, 8), &[0; 128], None);
        let header = parse_gim(&data).unwrap();
        let info = header.info();
        assert_eq!(info.pixel_format, None);
        assert_eq!(info.pixel_format_code, 6);
        assert!(info.needs_external_palette);
    }

    #[test]
    fn payload_past_chunk_is_rejected() {
        let mut data = file(&block(0x03, 4, 4), &[5; 64], None);
        // Data end field of the image block.
        let field = 0x30 + 0x10 + BLOCK_DATA_END_OFFSET;
        data[field] = 0xFF;
        assert!(matches!(
            parse_gim(&data),
            Err(TextureError::InvalidFormat(FormatMismatch::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn missing_texture_chunk_is_corrupt() {
        let mut out = GIM_SIGNATURE.to_vec();
        out.extend_from_slice(&[0; 4]);
        write_container_chunk(ChunkKind::EndOfFile, &[], &mut out);
        assert!(matches!(
            parse_gim(&out),
            Err(TextureError::CorruptChunk {
                fault: ChunkFault::MissingChunk(0x04),
                ..
            })
        ));
    }

    #[test]
    fn wrong_signature_is_rejected() {
        let mut data = file(&block(0x03, 4, 4), &[5; 64], None);
        data[0] = b'X';
        assert_eq!(
            parse_gim(&data),
            Err(TextureError::InvalidFormat(FormatMismatch::BadMagic))
        );
    }
}
