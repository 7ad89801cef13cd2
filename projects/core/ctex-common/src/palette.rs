//! Palettes and the palette entry codec.

use crate::color_8888::Color8888;
use crate::error::{CodecKind, TextureError, TextureResult};
use crate::pixel::{Endian, PixelCodec, PixelFormat};
use alloc::vec::Vec;

/// Largest palette any indexed format can address.
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// Where a [`Palette`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    /// Stored inside the texture container.
    Embedded,
    /// Stored in a separate palette file and supplied by the caller.
    External,
    /// Generated grayscale ramp, used only when the caller opts in.
    SyntheticGrayscale,
}

/// An ordered table of colors; entry order is index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Color8888>,
    format: PixelFormat,
    source: PaletteSource,
}

impl Palette {
    /// Creates a palette whose entries are stored on disk as `format`.
    ///
    /// # Errors
    ///
    /// - [`TextureError::UnsupportedCodec`] if `format` is itself indexed.
    /// - [`TextureError::PaletteOverflow`] if there are more than 256 entries.
    pub fn new(
        entries: Vec<Color8888>,
        format: PixelFormat,
        source: PaletteSource,
    ) -> TextureResult<Self> {
        if format.is_indexed() {
            return Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Palette,
                code: format as u16,
            });
        }
        if entries.len() > MAX_PALETTE_ENTRIES {
            return Err(TextureError::PaletteOverflow {
                entries: entries.len(),
                max: MAX_PALETTE_ENTRIES,
            });
        }
        Ok(Self {
            entries,
            format,
            source,
        })
    }

    /// Grayscale ramp of `count` entries where entry `i` is `i * 255 / count`.
    pub fn synthetic_grayscale(count: usize, format: PixelFormat) -> TextureResult<Self> {
        let count = count.max(1);
        let entries = (0..count)
            .map(|i| Color8888::gray((i * 255 / count) as u8))
            .collect();
        Self::new(entries, format, PaletteSource::SyntheticGrayscale)
    }

    /// Decodes `count` entries of `format` from `data`.
    pub fn decode(
        data: &[u8],
        count: usize,
        format: PixelFormat,
        endian: Endian,
        source: PaletteSource,
    ) -> TextureResult<Self> {
        let entries = PaletteCodec::new(format, endian)?.decode_entries(data, count)?;
        Self::new(entries, format, source)
    }

    /// Encodes the entries in this palette's on-disk format.
    pub fn encode(&self, endian: Endian) -> TextureResult<Vec<u8>> {
        PaletteCodec::new(self.format, endian)?.encode_entries(&self.entries)
    }

    /// Encodes the entries padded with transparent black up to `count` entries.
    pub fn encode_padded(&self, count: usize, endian: Endian) -> TextureResult<Vec<u8>> {
        if self.entries.len() > count {
            return Err(TextureError::PaletteOverflow {
                entries: self.entries.len(),
                max: count,
            });
        }
        let mut entries = self.entries.clone();
        entries.resize(count, Color8888::TRANSPARENT);
        PaletteCodec::new(self.format, endian)?.encode_entries(&entries)
    }

    /// Fails with [`TextureError::PaletteOverflow`] if the palette has more entries than
    /// `indexed` can address.
    pub fn check_capacity(&self, indexed: PixelFormat) -> TextureResult<()> {
        let max = indexed.palette_entries();
        if self.entries.len() > max {
            return Err(TextureError::PaletteOverflow {
                entries: self.entries.len(),
                max,
            });
        }
        Ok(())
    }

    /// Same palette with a different provenance tag.
    pub fn with_source(mut self, source: PaletteSource) -> Self {
        self.source = source;
        self
    }

    /// Same colors stored as a different entry format.
    pub fn with_format(self, format: PixelFormat) -> TextureResult<Self> {
        Self::new(self.entries, format, self.source)
    }

    /// Palette colors in index order.
    #[inline]
    pub fn entries(&self) -> &[Color8888] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// On-disk entry format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Provenance.
    #[inline]
    pub fn source(&self) -> PaletteSource {
        self.source
    }
}

/// Encodes and decodes contiguous arrays of palette entries.
///
/// Palettes are always linear arrays, whatever layout the texture's pixels use.
#[derive(Debug, Clone, Copy)]
pub struct PaletteCodec {
    codec: &'static PixelCodec,
    endian: Endian,
}

impl PaletteCodec {
    /// Creates an entry codec for `format`.
    ///
    /// # Errors
    ///
    /// [`TextureError::UnsupportedCodec`] if `format` is indexed.
    pub fn new(format: PixelFormat, endian: Endian) -> TextureResult<Self> {
        if format.is_indexed() {
            return Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Palette,
                code: format as u16,
            });
        }
        Ok(Self {
            codec: format.codec(),
            endian,
        })
    }

    /// Bytes used by one entry.
    #[inline]
    pub fn entry_size(&self) -> usize {
        self.codec.bits_per_pixel() as usize / 8
    }

    /// Decodes entries `0..count`.
    pub fn decode_entries(&self, data: &[u8], count: usize) -> TextureResult<Vec<Color8888>> {
        self.codec.decode_pixels(data, count, self.endian, None)
    }

    /// Encodes `entries` in order.
    pub fn encode_entries(&self, entries: &[Color8888]) -> TextureResult<Vec<u8>> {
        self.codec.encode_pixels(entries, self.endian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn synthetic_grayscale_ramp() {
        let palette = Palette::synthetic_grayscale(16, PixelFormat::Rgb565).unwrap();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.entries()[0], Color8888::gray(0));
        assert_eq!(palette.entries()[1], Color8888::gray(15));
        assert_eq!(palette.entries()[15], Color8888::gray(239));
        assert_eq!(palette.source(), PaletteSource::SyntheticGrayscale);
    }

    #[test]
    fn capacity_is_checked_against_indexed_format() {
        let palette =
            Palette::new(vec![Color8888::BLACK; 17], PixelFormat::Rgb565, PaletteSource::External)
                .unwrap();
        assert_eq!(
            palette.check_capacity(PixelFormat::Index4),
            Err(TextureError::PaletteOverflow {
                entries: 17,
                max: 16
            })
        );
        assert!(palette.check_capacity(PixelFormat::Index8).is_ok());
    }

    #[test]
    fn oversized_palette_is_rejected() {
        let result = Palette::new(
            vec![Color8888::BLACK; 257],
            PixelFormat::Argb8888,
            PaletteSource::Embedded,
        );
        assert!(matches!(result, Err(TextureError::PaletteOverflow { .. })));
    }

    #[test]
    fn indexed_entry_format_is_rejected() {
        assert!(PaletteCodec::new(PixelFormat::Index8, Endian::Big).is_err());
    }

    #[rstest]
    #[case(PixelFormat::IntensityAlpha8, Endian::Big)]
    #[case(PixelFormat::Rgb5a3, Endian::Big)]
    #[case(PixelFormat::Argb8888, Endian::Little)]
    fn entries_round_trip(#[case] format: PixelFormat, #[case] endian: Endian) {
        let entries = vec![
            Color8888::gray(0),
            Color8888::gray(255),
            Color8888::new(0, 0, 0, 0),
        ];
        let palette = Palette::new(entries, format, PaletteSource::Embedded).unwrap();
        let bytes = palette.encode(endian).unwrap();
        let decoded =
            Palette::decode(&bytes, palette.len(), format, endian, PaletteSource::Embedded)
                .unwrap();
        assert_eq!(decoded, palette);
    }

    #[test]
    fn padded_encoding_fills_to_count() {
        let palette =
            Palette::new(vec![Color8888::BLACK; 3], PixelFormat::Rgb565, PaletteSource::Embedded)
                .unwrap();
        assert_eq!(palette.encode_padded(16, Endian::Big).unwrap().len(), 32);
    }
}
