//! Parsing and writing of the GVR headers.

use super::constants::*;
use super::formats::{GvrDataFlags, GvrDataFormat, GvrPaletteFormat};
use alloc::vec::Vec;
use ctex_common::error::require_len;
use ctex_common::{
    ContainerKind, FormatMismatch, GlobalIndex, GlobalIndexKind, TextureInfo, TextureResult,
};
use endian_writer::{
    BigEndianReader, BigEndianWriter, EndianReader, EndianWriter, LittleEndianReader,
    LittleEndianWriter,
};
use likely_stable::unlikely;

/// The headers of a GVR texture, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GvrHeader {
    /// Optional `GBIX`/`GCIX` header ahead of `GVRT`.
    pub global_index: Option<GlobalIndex>,
    /// Offset of the `GVRT` magic.
    pub texture_offset: usize,
    /// Bytes following the length field, header remainder included.
    pub declared_length: u32,
    /// High nibble of byte `0x0A`.
    pub palette_format_code: u8,
    /// Low nibble of byte `0x0A`.
    pub flags: GvrDataFlags,
    /// Byte `0x0B`.
    pub data_format_code: u8,
    /// Width of the base image.
    pub width: u16,
    /// Height of the base image.
    pub height: u16,
}

impl GvrHeader {
    /// Offset of the first payload byte.
    #[inline]
    pub fn data_offset(&self) -> usize {
        self.texture_offset + GVRT_HEADER_SIZE
    }

    /// Offset one past the last payload byte.
    #[inline]
    pub fn data_end(&self) -> usize {
        self.texture_offset + GVRT_LENGTH_BIAS + self.declared_length as usize
    }

    /// The data format, or [`UnsupportedCodec`] for an unknown code.
    ///
    /// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
    #[inline]
    pub fn data_format(&self) -> TextureResult<GvrDataFormat> {
        GvrDataFormat::try_from(self.data_format_code)
    }

    /// The palette format, or [`UnsupportedCodec`] for an unknown code.
    ///
    /// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
    #[inline]
    pub fn palette_format(&self) -> TextureResult<GvrPaletteFormat> {
        GvrPaletteFormat::try_from(self.palette_format_code)
    }

    /// Header information with every code resolved that can be.
    pub fn info(&self) -> TextureInfo {
        let mut info = TextureInfo::new(ContainerKind::Gvr, self.width as u32, self.height as u32);
        info.pixel_format_code = self.data_format_code as u16;
        info.data_format_code = self.data_format_code as u16;
        info.global_index = self.global_index;
        info.has_mipmaps = self.flags.contains(GvrDataFlags::MIPMAPS);

        let Ok(format) = self.data_format() else {
            return info;
        };
        info.pixel_format = Some(format.pixel_format());
        info.data_layout = Some(format.layout());
        if format.is_indexed() {
            info.palette_format_code = Some(self.palette_format_code as u16);
            info.palette_format = self
                .palette_format()
                .ok()
                .map(GvrPaletteFormat::pixel_format);
            info.has_embedded_palette = self.flags.contains(GvrDataFlags::INTERNAL_PALETTE);
            info.needs_external_palette = !info.has_embedded_palette;
        }
        info
    }

    /// Appends the global index header (if any) and the `GVRT` header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        if let Some(global_index) = self.global_index {
            let mut header = [0u8; GLOBAL_INDEX_HEADER_SIZE];
            header[..4].copy_from_slice(&global_index.kind.magic());
            // SAFETY: both offsets plus 4 lie within the 16-byte array.
            unsafe {
                let mut le = LittleEndianWriter::new(header.as_mut_ptr());
                le.write_u32_at(GLOBAL_INDEX_LENGTH, GLOBAL_INDEX_LENGTH_OFFSET as isize);
                let mut be = BigEndianWriter::new(header.as_mut_ptr());
                be.write_u32_at(global_index.value, GLOBAL_INDEX_VALUE_OFFSET as isize);
            }
            out.extend_from_slice(&header);
        }

        let mut header = [0u8; GVRT_HEADER_SIZE];
        header[..4].copy_from_slice(&GVRT_MAGIC);
        header[GVRT_FORMAT_OFFSET] = (self.palette_format_code << 4) | (self.flags.bits() & 0x0F);
        header[GVRT_DATA_FORMAT_OFFSET] = self.data_format_code;
        // SAFETY: every offset plus its field size lies within the 16-byte array.
        unsafe {
            let mut le = LittleEndianWriter::new(header.as_mut_ptr());
            le.write_u32_at(self.declared_length, GVRT_LENGTH_OFFSET as isize);
            let mut be = BigEndianWriter::new(header.as_mut_ptr());
            be.write_u16_at(self.width, GVRT_WIDTH_OFFSET as isize);
            be.write_u16_at(self.height, GVRT_HEIGHT_OFFSET as isize);
        }
        out.extend_from_slice(&header);
    }
}

/// Parses the GVR headers of `data`.
///
/// Only the headers are inspected. Unknown format codes are kept raw and surface as
/// [`UnsupportedCodec`] once pixels are decoded.
///
/// # Errors
///
/// - [`FormatMismatch::Truncated`] if the headers do not fit.
/// - [`FormatMismatch::BadMagic`] if `GVRT` is not where it should be.
/// - [`FormatMismatch::LengthMismatch`] if the declared length runs past the buffer.
///
/// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
pub fn parse_gvr(data: &[u8]) -> TextureResult<GvrHeader> {
    let (global_index, texture_offset) = match data.get(..4).and_then(GlobalIndexKind::from_magic)
    {
        Some(kind) => {
            require_len(data, GLOBAL_INDEX_HEADER_SIZE)?;
            // SAFETY: data.len() >= GLOBAL_INDEX_HEADER_SIZE (16), so offset 0x08 + 4 is in bounds.
            let mut reader = unsafe { BigEndianReader::new(data.as_ptr()) };
            let value = unsafe { reader.read_u32_at(GLOBAL_INDEX_VALUE_OFFSET as isize) };
            (Some(GlobalIndex { value, kind }), GLOBAL_INDEX_HEADER_SIZE)
        }
        None => (None, 0),
    };

    require_len(data, texture_offset + GVRT_HEADER_SIZE)?;
    let texture = &data[texture_offset..];
    if unlikely(texture[..4] != GVRT_MAGIC) {
        return Err(FormatMismatch::BadMagic.into());
    }

    // SAFETY: texture.len() >= GVRT_HEADER_SIZE (16), so every field below is in bounds.
    let mut le = unsafe { LittleEndianReader::new(texture.as_ptr()) };
    let declared_length = unsafe { le.read_u32_at(GVRT_LENGTH_OFFSET as isize) };
    let mut be = unsafe { BigEndianReader::new(texture.as_ptr()) };
    let width = unsafe { be.read_u16_at(GVRT_WIDTH_OFFSET as isize) };
    let height = unsafe { be.read_u16_at(GVRT_HEIGHT_OFFSET as isize) };

    let declared = declared_length as usize;
    let available = texture.len() - GVRT_LENGTH_BIAS;
    if unlikely(declared < GVRT_LENGTH_BIAS || declared > available) {
        return Err(FormatMismatch::LengthMismatch {
            declared,
            actual: available,
        }
        .into());
    }

    let format = texture[GVRT_FORMAT_OFFSET];
    let header = GvrHeader {
        global_index,
        texture_offset,
        declared_length,
        palette_format_code: format >> 4,
        flags: GvrDataFlags::from_bits_retain(format & 0x0F),
        data_format_code: texture[GVRT_DATA_FORMAT_OFFSET],
        width,
        height,
    };
    tracing::debug!(
        width,
        height,
        data_format = header.data_format_code,
        palette_format = header.palette_format_code,
        flags = header.flags.bits(),
        "parsed GVR header"
    );
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use ctex_common::{DataLayout, PixelFormat, TextureError};

    fn header(global_index: Option<GlobalIndex>, data_format: u8, flags: u8) -> GvrHeader {
        GvrHeader {
            global_index,
            texture_offset: if global_index.is_some() { 16 } else { 0 },
            declared_length: 8 + 32,
            palette_format_code: 2,
            flags: GvrDataFlags::from_bits_retain(flags),
            data_format_code: data_format,
            width: 8,
            height: 8,
        }
    }

    fn serialize(header: &GvrHeader) -> Vec<u8> {
        let mut out = Vec::new();
        header.write_to(&mut out);
        out.resize(header.data_end(), 0);
        out
    }

    #[rstest]
    #[case(None)]
    #[case(Some(GlobalIndex::gbix(0x1234_5678)))]
    #[case(Some(GlobalIndex::gcix(7)))]
    fn header_survives_write_and_parse(#[case] global_index: Option<GlobalIndex>) {
        let original = header(global_index, 0x08, 0x08);
        assert_eq!(parse_gvr(&serialize(&original)).unwrap(), original);
    }

    #[test]
    fn fields_use_documented_byte_orders() {
        let bytes = serialize(&GvrHeader {
            width: 0x0102,
            height: 0x0304,
            ..header(Some(GlobalIndex::gbix(0xAABB_CCDD)), 0x04, 0x01)
        });
        assert_eq!(&bytes[0..4], b"GBIX");
        assert_eq!(&bytes[4..8], &[8, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(&bytes[16..20], b"GVRT");
        assert_eq!(&bytes[20..24], &[40, 0, 0, 0]);
        assert_eq!(bytes[26], 0x21);
        assert_eq!(bytes[27], 0x04);
        assert_eq!(&bytes[28..32], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn truncated_header_is_rejected() {
        let bytes = serialize(&header(None, 0x04, 0));
        assert!(matches!(
            parse_gvr(&bytes[..12]),
            Err(TextureError::InvalidFormat(FormatMismatch::Truncated { .. }))
        ));
    }

    #[test]
    fn declared_length_past_end_is_rejected() {
        let bytes = serialize(&header(None, 0x04, 0));
        assert_eq!(
            parse_gvr(&bytes[..bytes.len() - 1]),
            Err(TextureError::InvalidFormat(FormatMismatch::LengthMismatch {
                declared: 40,
                actual: 39
            }))
        );
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut bytes = serialize(&header(None, 0x04, 0));
        bytes[0] = b'P';
        assert_eq!(
            parse_gvr(&bytes),
            Err(TextureError::InvalidFormat(FormatMismatch::BadMagic))
        );
    }

    #[test]
    fn info_resolves_indexed_texture() {
        let info = header(None, 0x08, 0x08).info();
        assert_eq!(info.pixel_format, Some(PixelFormat::Index4));
        assert_eq!(
            info.data_layout,
            Some(DataLayout::TiledBlock {
                tile_width: 8,
                tile_height: 8
            })
        );
        assert_eq!(info.palette_format, Some(PixelFormat::Rgb5a3));
        assert!(info.has_embedded_palette);
        assert!(!info.needs_external_palette);
    }

    #[test]
    fn indexed_texture_without_palette_flags_needs_external_palette() {
        let info = header(None, 0x09, 0).info();
        assert!(!info.has_embedded_palette);
        assert!(info.needs_external_palette);
    }

    #[test]
    fn unknown_data_format_keeps_info_readable() {
        let info = header(None, 0x07, 0).info();
        assert_eq!(info.width, 8);
        assert_eq!(info.data_format_code, 0x07);
        assert_eq!(info.pixel_format, None);
        assert!(info.require_data_layout().is_err());
    }
}
