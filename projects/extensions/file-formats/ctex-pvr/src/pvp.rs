//! PVP palette files.
//!
//! A 16-byte `PVPL` header followed by little-endian palette entries. Indexed PVR
//! textures always take their palette from one of these.

use crate::pvr::PvrPixelFormat;
use alloc::vec::Vec;
use ctex_common::error::require_len;
use ctex_common::{
    CodecKind, Endian, FormatMismatch, Palette, PaletteSource, TextureError, TextureResult,
};
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};
use likely_stable::unlikely;

const PVPL_MAGIC: [u8; 4] = *b"PVPL";
const HEADER_SIZE: usize = 0x10;
const LENGTH_OFFSET: usize = 0x04;
const FORMAT_OFFSET: usize = 0x08;
const COUNT_OFFSET: usize = 0x0E;
/// Bytes between the end of the length field and the entries.
const LENGTH_BIAS: usize = 8;

/// Determines if the given data likely represents a PVP palette.
#[inline]
pub fn likely_pvp(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && data[..4] == PVPL_MAGIC
}

/// Reads a PVP palette file.
///
/// # Errors
///
/// - [`TextureError::InvalidFormat`] for a bad magic, inconsistent length or truncation.
/// - [`TextureError::UnsupportedCodec`] for an unknown or codec-less entry format.
/// - [`TextureError::PaletteOverflow`] for more than 256 entries.
pub fn read_pvp(data: &[u8]) -> TextureResult<Palette> {
    require_len(data, HEADER_SIZE)?;
    if unlikely(data[..4] != PVPL_MAGIC) {
        return Err(FormatMismatch::BadMagic.into());
    }

    // SAFETY: data.len() >= HEADER_SIZE (16), so both fields are in bounds.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let declared = unsafe { reader.read_u32_at(LENGTH_OFFSET as isize) } as usize;
    let count = unsafe { reader.read_u16_at(COUNT_OFFSET as isize) } as usize;

    let available = data.len() - LENGTH_BIAS;
    if unlikely(declared < LENGTH_BIAS || declared > available) {
        return Err(FormatMismatch::LengthMismatch {
            declared,
            actual: available,
        }
        .into());
    }

    let format = PvrPixelFormat::try_from(data[FORMAT_OFFSET])?.require_pixel_format()?;
    tracing::debug!(count, format = data[FORMAT_OFFSET], "parsed PVP header");
    Palette::decode(
        &data[HEADER_SIZE..LENGTH_BIAS + declared],
        count,
        format,
        Endian::Little,
        PaletteSource::External,
    )
}

/// Writes `palette` as a PVP palette file holding exactly its entries.
///
/// # Errors
///
/// [`TextureError::UnsupportedCodec`] if the palette's entry format has no PVR code.
pub fn write_pvp(palette: &Palette) -> TextureResult<Vec<u8>> {
    let format = PvrPixelFormat::from_pixel_format(palette.format()).ok_or(
        TextureError::UnsupportedCodec {
            kind: CodecKind::Palette,
            code: palette.format() as u16,
        },
    )?;
    let entries = palette.encode(Endian::Little)?;

    let mut header = [0u8; HEADER_SIZE];
    header[..4].copy_from_slice(&PVPL_MAGIC);
    header[FORMAT_OFFSET] = format.into();
    // SAFETY: every offset plus its field size lies within the 16-byte array.
    unsafe {
        let mut writer = LittleEndianWriter::new(header.as_mut_ptr());
        writer.write_u32_at((entries.len() + LENGTH_BIAS) as u32, LENGTH_OFFSET as isize);
        writer.write_u16_at(palette.len() as u16, COUNT_OFFSET as isize);
    }

    let mut out = Vec::with_capacity(HEADER_SIZE + entries.len());
    out.extend_from_slice(&header);
    out.extend(entries);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use ctex_common::PixelFormat;

    fn palette(count: usize, format: PixelFormat) -> Palette {
        Palette::new(EXACT_COLORS[..count].to_vec(), format, PaletteSource::External).unwrap()
    }

    #[test]
    fn header_layout() {
        let bytes = write_pvp(&palette(4, PixelFormat::Argb8888)).unwrap();
        assert_eq!(&bytes[0..4], b"PVPL");
        assert_eq!(&bytes[4..8], &[24, 0, 0, 0]);
        assert_eq!(bytes[0x08], 0x06);
        assert_eq!(&bytes[0x0E..0x10], &[4, 0]);
        assert_eq!(bytes.len(), 16 + 16);
        // Red as little-endian ARGB8888.
        assert_eq!(&bytes[0x18..0x1C], &[0x00, 0x00, 0xFF, 0xFF]);
    }

    #[rstest]
    #[case(PixelFormat::Argb1555)]
    #[case(PixelFormat::Rgb565)]
    #[case(PixelFormat::Argb4444)]
    #[case(PixelFormat::Argb8888)]
    fn palette_survives_write_and_read(#[case] format: PixelFormat) {
        let original = palette(8, format);
        assert_eq!(read_pvp(&write_pvp(&original).unwrap()).unwrap(), original);
    }

    #[test]
    fn gamecube_entry_format_is_rejected() {
        assert!(matches!(
            write_pvp(&palette(2, PixelFormat::Rgb5a3)),
            Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Palette,
                ..
            })
        ));
    }

    #[test]
    fn yuv_entries_are_unsupported() {
        let mut bytes = write_pvp(&palette(2, PixelFormat::Rgb565)).unwrap();
        bytes[0x08] = 0x03;
        assert!(matches!(
            read_pvp(&bytes),
            Err(TextureError::UnsupportedCodec { code: 3, .. })
        ));
    }

    #[test]
    fn declared_length_past_end_is_rejected() {
        let bytes = write_pvp(&palette(8, PixelFormat::Rgb565)).unwrap();
        assert!(matches!(
            read_pvp(&bytes[..bytes.len() - 1]),
            Err(TextureError::InvalidFormat(FormatMismatch::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn likely_pvp_checks_magic() {
        let bytes = write_pvp(&palette(2, PixelFormat::Rgb565)).unwrap();
        assert!(likely_pvp(&bytes));
        assert!(!likely_pvp(b"GVPL000000000000"));
    }
}
