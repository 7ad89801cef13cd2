//! Parsing and writing of the PVR headers.

use super::constants::*;
use super::formats::{PvrDataFormat, PvrPixelFormat};
use alloc::vec::Vec;
use ctex_common::error::require_len;
use ctex_common::{
    ContainerKind, FormatMismatch, GlobalIndex, GlobalIndexKind, TextureInfo, TextureResult,
};
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};
use likely_stable::unlikely;

/// The headers of a PVR texture, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PvrHeader {
    /// Optional `GBIX`/`GCIX` header ahead of `PVRT`.
    pub global_index: Option<GlobalIndex>,
    /// Offset of the `PVRT` magic.
    pub texture_offset: usize,
    /// Bytes following the length field, header remainder included.
    pub declared_length: u32,
    /// Byte `0x08`.
    pub pixel_format_code: u8,
    /// Byte `0x09`.
    pub data_format_code: u8,
    /// Width of the base image.
    pub width: u16,
    /// Height of the base image.
    pub height: u16,
}

impl PvrHeader {
    /// Offset of the first payload byte.
    #[inline]
    pub fn data_offset(&self) -> usize {
        self.texture_offset + PVRT_HEADER_SIZE
    }

    /// Offset one past the last payload byte.
    #[inline]
    pub fn data_end(&self) -> usize {
        self.texture_offset + PVRT_LENGTH_BIAS + self.declared_length as usize
    }

    /// The pixel format, or [`UnsupportedCodec`] for an unknown code.
    ///
    /// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
    #[inline]
    pub fn pixel_format(&self) -> TextureResult<PvrPixelFormat> {
        PvrPixelFormat::try_from(self.pixel_format_code)
    }

    /// The data format, or [`UnsupportedCodec`] for an unknown code.
    ///
    /// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
    #[inline]
    pub fn data_format(&self) -> TextureResult<PvrDataFormat> {
        PvrDataFormat::try_from(self.data_format_code)
    }

    /// Header information with every code resolved that can be.
    ///
    /// Indexed data formats report the index format as the pixel format and the pixel
    /// format byte as the palette format.
    pub fn info(&self) -> TextureInfo {
        let mut info = TextureInfo::new(ContainerKind::Pvr, self.width as u32, self.height as u32);
        info.pixel_format_code = self.pixel_format_code as u16;
        info.data_format_code = self.data_format_code as u16;
        info.global_index = self.global_index;

        let pixel_format = self.pixel_format().ok().and_then(PvrPixelFormat::pixel_format);
        let Ok(data_format) = self.data_format() else {
            info.pixel_format = pixel_format;
            return info;
        };
        info.data_layout = Some(data_format.layout());
        info.has_mipmaps = data_format.has_mipmaps();
        match data_format.index_format() {
            Some(index_format) => {
                info.pixel_format = Some(index_format);
                info.palette_format_code = Some(self.pixel_format_code as u16);
                info.palette_format = pixel_format;
                info.needs_external_palette = true;
            }
            None => info.pixel_format = pixel_format,
        }
        info
    }

    /// Appends the global index header (if any) and the `PVRT` header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        if let Some(global_index) = self.global_index {
            let mut header = [0u8; 0x10];
            header[..4].copy_from_slice(&global_index.kind.magic());
            // SAFETY: both offsets plus 4 lie within the 16-byte array.
            unsafe {
                let mut le = LittleEndianWriter::new(header.as_mut_ptr());
                le.write_u32_at(GLOBAL_INDEX_LENGTH, GLOBAL_INDEX_LENGTH_OFFSET as isize);
                le.write_u32_at(global_index.value, GLOBAL_INDEX_VALUE_OFFSET as isize);
            }
            out.extend_from_slice(&header);
        }

        let mut header = [0u8; PVRT_HEADER_SIZE];
        header[..4].copy_from_slice(&PVRT_MAGIC);
        header[PVRT_PIXEL_FORMAT_OFFSET] = self.pixel_format_code;
        header[PVRT_DATA_FORMAT_OFFSET] = self.data_format_code;
        // SAFETY: every offset plus its field size lies within the 16-byte array.
        unsafe {
            let mut le = LittleEndianWriter::new(header.as_mut_ptr());
            le.write_u32_at(self.declared_length, PVRT_LENGTH_OFFSET as isize);
            le.write_u16_at(self.width, PVRT_WIDTH_OFFSET as isize);
            le.write_u16_at(self.height, PVRT_HEIGHT_OFFSET as isize);
        }
        out.extend_from_slice(&header);
    }
}

/// Parses the PVR headers of `data`.
///
/// The global index header's own length field locates `PVRT`, so headers of 12 and 16
/// bytes are both accepted. Unknown format codes are kept raw.
///
/// # Errors
///
/// - [`FormatMismatch::Truncated`] if the headers do not fit.
/// - [`FormatMismatch::BadMagic`] if `PVRT` is not where it should be.
/// - [`FormatMismatch::LengthMismatch`] if a declared length is inconsistent with the buffer.
pub fn parse_pvr(data: &[u8]) -> TextureResult<PvrHeader> {
    let (global_index, texture_offset) = match data.get(..4).and_then(GlobalIndexKind::from_magic)
    {
        Some(kind) => {
            require_len(data, GLOBAL_INDEX_VALUE_OFFSET + 4)?;
            // SAFETY: data.len() >= 12, so the length field and the index are in bounds.
            let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
            let length = unsafe { reader.read_u32_at(GLOBAL_INDEX_LENGTH_OFFSET as isize) };
            if unlikely(length < 4) {
                return Err(FormatMismatch::LengthMismatch {
                    declared: length as usize,
                    actual: 4,
                }
                .into());
            }
            let value = unsafe { reader.read_u32_at(GLOBAL_INDEX_VALUE_OFFSET as isize) };
            (
                Some(GlobalIndex { value, kind }),
                GLOBAL_INDEX_PREFIX_SIZE + length as usize,
            )
        }
        None => (None, 0),
    };

    require_len(data, texture_offset.saturating_add(PVRT_HEADER_SIZE))?;
    let texture = &data[texture_offset..];
    if unlikely(texture[..4] != PVRT_MAGIC) {
        return Err(FormatMismatch::BadMagic.into());
    }

    // SAFETY: texture.len() >= PVRT_HEADER_SIZE (16), so every field below is in bounds.
    let mut reader = unsafe { LittleEndianReader::new(texture.as_ptr()) };
    let declared_length = unsafe { reader.read_u32_at(PVRT_LENGTH_OFFSET as isize) };
    let width = unsafe { reader.read_u16_at(PVRT_WIDTH_OFFSET as isize) };
    let height = unsafe { reader.read_u16_at(PVRT_HEIGHT_OFFSET as isize) };

    let declared = declared_length as usize;
    let available = texture.len() - PVRT_LENGTH_BIAS;
    if unlikely(declared < PVRT_LENGTH_BIAS || declared > available) {
        return Err(FormatMismatch::LengthMismatch {
            declared,
            actual: available,
        }
        .into());
    }

    let header = PvrHeader {
        global_index,
        texture_offset,
        declared_length,
        pixel_format_code: texture[PVRT_PIXEL_FORMAT_OFFSET],
        data_format_code: texture[PVRT_DATA_FORMAT_OFFSET],
        width,
        height,
    };
    tracing::debug!(
        width,
        height,
        pixel_format = header.pixel_format_code,
        data_format = header.data_format_code,
        "parsed PVR header"
    );
    Ok(header)
}
