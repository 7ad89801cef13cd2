//! GVP palette files.
//!
//! A 16-byte `GVPL` header followed by big-endian palette entries. Indexed GVR textures
//! without an embedded palette take theirs from one of these.

use crate::gvr::GvrPaletteFormat;
use alloc::vec::Vec;
use ctex_common::error::require_len;
use ctex_common::{
    CodecKind, Endian, FormatMismatch, Palette, PaletteSource, TextureError, TextureResult,
};
use endian_writer::{
    BigEndianReader, BigEndianWriter, EndianReader, EndianWriter, LittleEndianReader,
    LittleEndianWriter,
};
use likely_stable::unlikely;

const GVPL_MAGIC: [u8; 4] = *b"GVPL";
const HEADER_SIZE: usize = 0x10;
const LENGTH_OFFSET: usize = 0x04;
const FORMAT_OFFSET: usize = 0x09;
const COUNT_OFFSET: usize = 0x0E;
/// Bytes between the end of the length field and the entries.
const LENGTH_BIAS: usize = 8;

/// Determines if the given data likely represents a GVP palette.
#[inline]
pub fn likely_gvp(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && data[..4] == GVPL_MAGIC
}

/// Reads a GVP palette file.
///
/// # Errors
///
/// - [`TextureError::InvalidFormat`] for a bad magic, inconsistent length or truncation.
/// - [`TextureError::UnsupportedCodec`] for an unknown entry format.
/// - [`TextureError::PaletteOverflow`] for more than 256 entries.
pub fn read_gvp(data: &[u8]) -> TextureResult<Palette> {
    require_len(data, HEADER_SIZE)?;
    if unlikely(data[..4] != GVPL_MAGIC) {
        return Err(FormatMismatch::BadMagic.into());
    }

    // SAFETY: data.len() >= HEADER_SIZE (16), so both fields are in bounds.
    let mut le = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let declared = unsafe { le.read_u32_at(LENGTH_OFFSET as isize) } as usize;
    let mut be = unsafe { BigEndianReader::new(data.as_ptr()) };
    let count = unsafe { be.read_u16_at(COUNT_OFFSET as isize) } as usize;

    let available = data.len() - LENGTH_BIAS;
    if unlikely(declared < LENGTH_BIAS || declared > available) {
        return Err(FormatMismatch::LengthMismatch {
            declared,
            actual: available,
        }
        .into());
    }

    let format = GvrPaletteFormat::try_from(data[FORMAT_OFFSET])?;
    tracing::debug!(count, format = data[FORMAT_OFFSET], "parsed GVP header");
    Palette::decode(
        &data[HEADER_SIZE..LENGTH_BIAS + declared],
        count,
        format.pixel_format(),
        Endian::Big,
        PaletteSource::External,
    )
}

/// Writes `palette` as a GVP palette file holding exactly its entries.
///
/// # Errors
///
/// [`TextureError::UnsupportedCodec`] if the palette's entry format has no GVR code.
pub fn write_gvp(palette: &Palette) -> TextureResult<Vec<u8>> {
    let format = GvrPaletteFormat::from_pixel_format(palette.format()).ok_or(
        TextureError::UnsupportedCodec {
            kind: CodecKind::Palette,
            code: palette.format() as u16,
        },
    )?;
    let entries = palette.encode(Endian::Big)?;

    let mut header = [0u8; HEADER_SIZE];
    header[..4].copy_from_slice(&GVPL_MAGIC);
    header[FORMAT_OFFSET] = format.into();
    // SAFETY: every offset plus its field size lies within the 16-byte array.
    unsafe {
        let mut le = LittleEndianWriter::new(header.as_mut_ptr());
        le.write_u32_at((entries.len() + LENGTH_BIAS) as u32, LENGTH_OFFSET as isize);
        let mut be = BigEndianWriter::new(header.as_mut_ptr());
        be.write_u16_at(palette.len() as u16, COUNT_OFFSET as isize);
    }

    let mut out = Vec::with_capacity(HEADER_SIZE + entries.len());
    out.extend_from_slice(&header);
    out.extend(entries);
    Ok(out)
}
