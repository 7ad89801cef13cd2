//! Enumerants of GIM image and palette blocks.

use super::constants::{HEIGHT_ALIGN, PITCH_ALIGN};
use ctex_common::block::DxtVariant;
use ctex_common::{CodecKind, DataLayout, PixelFormat, TextureError, TextureResult};

/// Pixel format of the image block, offset `0x04`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GimPixelFormat {
    /// 16-bit, red in the low bits.
    Bgr565 = 0x00,
    /// 16-bit with 1-bit alpha, red in the low bits.
    Abgr1555 = 0x01,
    /// 16-bit, 4 bits per channel, red in the low bits.
    Abgr4444 = 0x02,
    /// 32-bit, bytes in R, G, B, A order.
    #[default]
    Abgr8888 = 0x03,
    /// 4-bit palette indices, first pixel in the low nibble.
    Index4 = 0x04,
    /// 8-bit palette indices.
    Index8 = 0x05,
    /// 16-bit palette indices. Recognized, no codec.
    Index16 = 0x06,
    /// 32-bit palette indices. Recognized, no codec.
    Index32 = 0x07,
    /// DXT1 blocks.
    Dxt1 = 0x08,
    /// DXT3 blocks.
    Dxt3 = 0x09,
    /// DXT5 blocks.
    Dxt5 = 0x0A,
}

impl GimPixelFormat {
    /// Codec of the format, if it has one.
    ///
    /// DXT formats report the format of their color endpoints.
    #[inline]
    pub const fn pixel_format(self) -> Option<PixelFormat> {
        match self {
            GimPixelFormat::Bgr565 => Some(PixelFormat::Bgr565),
            GimPixelFormat::Abgr1555 => Some(PixelFormat::Abgr1555),
            GimPixelFormat::Abgr4444 => Some(PixelFormat::Abgr4444),
            GimPixelFormat::Abgr8888 => Some(PixelFormat::Abgr8888),
            GimPixelFormat::Index4 => Some(PixelFormat::Index4),
            GimPixelFormat::Index8 => Some(PixelFormat::Index8),
            GimPixelFormat::Dxt1 | GimPixelFormat::Dxt3 | GimPixelFormat::Dxt5 => {
                Some(PixelFormat::Rgb565)
            }
            GimPixelFormat::Index16 | GimPixelFormat::Index32 => None,
        }
    }

    /// The codec of a non-DXT format, or [`TextureError::UnsupportedCodec`].
    pub fn require_pixel_format(self) -> TextureResult<PixelFormat> {
        match self.pixel_format() {
            Some(format) if self.dxt_variant().is_none() => Ok(format),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                code: self as u16,
            }),
        }
    }

    /// Block variant of the DXT formats.
    #[inline]
    pub const fn dxt_variant(self) -> Option<DxtVariant> {
        match self {
            GimPixelFormat::Dxt1 => Some(DxtVariant::Dxt1),
            GimPixelFormat::Dxt3 => Some(DxtVariant::Dxt3),
            GimPixelFormat::Dxt5 => Some(DxtVariant::Dxt5),
            _ => None,
        }
    }

    /// Value of the block's bits-per-pixel field.
    pub const fn bits_per_pixel(self) -> u16 {
        match self {
            GimPixelFormat::Bgr565
            | GimPixelFormat::Abgr1555
            | GimPixelFormat::Abgr4444
            | GimPixelFormat::Index16 => 16,
            GimPixelFormat::Abgr8888 | GimPixelFormat::Index32 => 32,
            GimPixelFormat::Index4 | GimPixelFormat::Dxt1 => 4,
            GimPixelFormat::Index8 | GimPixelFormat::Dxt3 | GimPixelFormat::Dxt5 => 8,
        }
    }

    /// Whether pixels are palette indices.
    #[inline]
    pub const fn is_indexed(self) -> bool {
        matches!(
            self,
            GimPixelFormat::Index4
                | GimPixelFormat::Index8
                | GimPixelFormat::Index16
                | GimPixelFormat::Index32
        )
    }

    /// Layout of a payload in this format.
    pub const fn layout(self, swizzled: bool) -> DataLayout {
        if let Some(variant) = self.dxt_variant() {
            return DataLayout::CompressedBlock(variant);
        }
        if !swizzled {
            return DataLayout::Linear;
        }
        DataLayout::TiledBlock {
            tile_width: (PITCH_ALIGN * 8 / self.bits_per_pixel() as u32) as u8,
            tile_height: HEIGHT_ALIGN as u8,
        }
    }
}

impl From<GimPixelFormat> for u16 {
    fn from(value: GimPixelFormat) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for GimPixelFormat {
    type Error = TextureError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Bgr565),
            0x01 => Ok(Self::Abgr1555),
            0x02 => Ok(Self::Abgr4444),
            0x03 => Ok(Self::Abgr8888),
            0x04 => Ok(Self::Index4),
            0x05 => Ok(Self::Index8),
            0x06 => Ok(Self::Index16),
            0x07 => Ok(Self::Index32),
            0x08 => Ok(Self::Dxt1),
            0x09 => Ok(Self::Dxt3),
            0x0A => Ok(Self::Dxt5),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                code: value,
            }),
        }
    }
}

/// Entry format of the palette block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GimPaletteFormat {
    /// 16-bit, red in the low bits.
    Bgr565 = 0x00,
    /// 16-bit with 1-bit alpha.
    Abgr1555 = 0x01,
    /// 16-bit, 4 bits per channel.
    Abgr4444 = 0x02,
    /// 32-bit.
    #[default]
    Abgr8888 = 0x03,
}

impl GimPaletteFormat {
    /// Codec of the entries.
    #[inline]
    pub const fn pixel_format(self) -> PixelFormat {
        match self {
            GimPaletteFormat::Bgr565 => PixelFormat::Bgr565,
            GimPaletteFormat::Abgr1555 => PixelFormat::Abgr1555,
            GimPaletteFormat::Abgr4444 => PixelFormat::Abgr4444,
            GimPaletteFormat::Abgr8888 => PixelFormat::Abgr8888,
        }
    }

    /// Bits per entry.
    #[inline]
    pub const fn bits_per_pixel(self) -> u16 {
        match self {
            GimPaletteFormat::Abgr8888 => 32,
            _ => 16,
        }
    }
}

impl From<GimPaletteFormat> for u16 {
    fn from(value: GimPaletteFormat) -> Self {
        value as u16
    }
}

impl TryFrom<u16> for GimPaletteFormat {
    type Error = TextureError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Bgr565),
            0x01 => Ok(Self::Abgr1555),
            0x02 => Ok(Self::Abgr4444),
            0x03 => Ok(Self::Abgr8888),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Palette,
                code: value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(GimPixelFormat::Abgr8888, 4)]
    #[case(GimPixelFormat::Bgr565, 8)]
    #[case(GimPixelFormat::Index8, 16)]
    #[case(GimPixelFormat::Index4, 32)]
    fn swizzle_tiles_are_sixteen_bytes_wide(#[case] format: GimPixelFormat, #[case] width: u8) {
        assert_eq!(
            format.layout(true),
            DataLayout::TiledBlock {
                tile_width: width,
                tile_height: 8
            }
        );
        assert_eq!(format.layout(false), DataLayout::Linear);
    }

    #[test]
    fn dxt_payloads_are_blocks() {
        assert_eq!(
            GimPixelFormat::Dxt5.layout(true),
            DataLayout::CompressedBlock(DxtVariant::Dxt5)
        );
    }

    #[rstest]
    #[case(GimPixelFormat::Index16)]
    #[case(GimPixelFormat::Index32)]
    #[case(GimPixelFormat::Dxt1)]
    fn only_plain_formats_have_a_pixel_codec(#[case] format: GimPixelFormat) {
        assert!(matches!(
            format.require_pixel_format(),
            Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                ..
            })
        ));
    }

    #[test]
    fn codes_round_trip() {
        for code in 0..=0x20u16 {
            if let Ok(format) = GimPixelFormat::try_from(code) {
                assert_eq!(u16::from(format), code);
            }
            if let Ok(format) = GimPaletteFormat::try_from(code) {
                assert_eq!(u16::from(format), code);
            }
        }
        assert!(GimPixelFormat::try_from(0x0B).is_err());
        assert!(GimPaletteFormat::try_from(0x04).is_err());
    }
}
