//! Enumerants of the `PVRT` header.

use ctex_common::layout::ShapeConstraint;
use ctex_common::{CodecKind, DataLayout, PixelFormat, TextureError};

/// Pixel format, header byte `0x08`.
///
/// For indexed data formats this names the format of the external palette's entries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PvrPixelFormat {
    /// 1-bit alpha, 5 bits per color channel.
    Argb1555 = 0x00,
    /// 16-bit RGB565.
    #[default]
    Rgb565 = 0x01,
    /// 4 bits per channel.
    Argb4444 = 0x02,
    /// YUV 4:2:2. Recognized, no codec.
    Yuv422 = 0x03,
    /// Bump map. Recognized, no codec.
    Bump = 0x04,
    /// 5 bits per color channel, opaque.
    Rgb555 = 0x05,
    /// 8 bits per channel.
    Argb8888 = 0x06,
}

impl PvrPixelFormat {
    /// Codec of the format, if it has one.
    #[inline]
    pub const fn pixel_format(self) -> Option<PixelFormat> {
        match self {
            PvrPixelFormat::Argb1555 => Some(PixelFormat::Argb1555),
            PvrPixelFormat::Rgb565 => Some(PixelFormat::Rgb565),
            PvrPixelFormat::Argb4444 => Some(PixelFormat::Argb4444),
            PvrPixelFormat::Rgb555 => Some(PixelFormat::Rgb555),
            PvrPixelFormat::Argb8888 => Some(PixelFormat::Argb8888),
            PvrPixelFormat::Yuv422 | PvrPixelFormat::Bump => None,
        }
    }

    /// The PVR code storing pixels as `format`, if there is one.
    #[inline]
    pub const fn from_pixel_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::Argb1555 => Some(PvrPixelFormat::Argb1555),
            PixelFormat::Rgb565 => Some(PvrPixelFormat::Rgb565),
            PixelFormat::Argb4444 => Some(PvrPixelFormat::Argb4444),
            PixelFormat::Rgb555 => Some(PvrPixelFormat::Rgb555),
            PixelFormat::Argb8888 => Some(PvrPixelFormat::Argb8888),
            _ => None,
        }
    }

    /// The codec, or [`TextureError::UnsupportedCodec`] for YUV and bump maps.
    #[inline]
    pub fn require_pixel_format(self) -> Result<PixelFormat, TextureError> {
        self.pixel_format().ok_or(TextureError::UnsupportedCodec {
            kind: CodecKind::Pixel,
            code: self as u16,
        })
    }
}

impl From<PvrPixelFormat> for u8 {
    fn from(value: PvrPixelFormat) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for PvrPixelFormat {
    type Error = TextureError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Argb1555),
            0x01 => Ok(Self::Rgb565),
            0x02 => Ok(Self::Argb4444),
            0x03 => Ok(Self::Yuv422),
            0x04 => Ok(Self::Bump),
            0x05 => Ok(Self::Rgb555),
            0x06 => Ok(Self::Argb8888),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                code: value as u16,
            }),
        }
    }
}

/// Data format, header byte `0x09`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PvrDataFormat {
    /// Twiddled square.
    #[default]
    SquareTwiddled = 0x01,
    /// Twiddled square with mipmaps.
    SquareTwiddledMipmaps = 0x02,
    /// Vector quantized, 256-entry codebook.
    Vq = 0x03,
    /// Vector quantized with mipmaps, 256-entry codebook.
    VqMipmaps = 0x04,
    /// Twiddled 4-bit palette indices.
    Index4 = 0x05,
    /// Twiddled 8-bit palette indices.
    Index8 = 0x07,
    /// Row-major rectangle.
    Rectangle = 0x09,
    /// Row-major rectangle of any width.
    Stride = 0x0B,
    /// Rectangle twiddled in square sub-blocks.
    RectangleTwiddled = 0x0D,
    /// Vector quantized with a codebook sized to the texture.
    SmallVq = 0x10,
    /// Vector quantized with mipmaps and a codebook sized to the texture.
    SmallVqMipmaps = 0x11,
    /// Twiddled square with mipmaps, three pixels of padding.
    SquareTwiddledMipmapsAlt = 0x12,
}

impl PvrDataFormat {
    /// Spatial layout of the format.
    pub const fn layout(self) -> DataLayout {
        match self {
            PvrDataFormat::SquareTwiddled | PvrDataFormat::Index4 | PvrDataFormat::Index8 => {
                DataLayout::SquareTwiddled
            }
            PvrDataFormat::SquareTwiddledMipmaps | PvrDataFormat::SquareTwiddledMipmapsAlt => {
                DataLayout::SquareTwiddledWithMipmaps
            }
            PvrDataFormat::Vq | PvrDataFormat::SmallVq => DataLayout::VectorQuantized,
            PvrDataFormat::VqMipmaps | PvrDataFormat::SmallVqMipmaps => {
                DataLayout::VectorQuantizedWithMipmaps
            }
            PvrDataFormat::Rectangle | PvrDataFormat::Stride => DataLayout::Linear,
            PvrDataFormat::RectangleTwiddled => DataLayout::RectangleTwiddled,
        }
    }

    /// Whether a mipmap chain precedes the base image.
    #[inline]
    pub const fn has_mipmaps(self) -> bool {
        self.layout().has_mipmaps()
    }

    /// Whether the data is vector quantized.
    #[inline]
    pub const fn is_vq(self) -> bool {
        matches!(
            self.layout(),
            DataLayout::VectorQuantized | DataLayout::VectorQuantizedWithMipmaps
        )
    }

    /// Index format of the palette-indexed data formats.
    #[inline]
    pub const fn index_format(self) -> Option<PixelFormat> {
        match self {
            PvrDataFormat::Index4 => Some(PixelFormat::Index4),
            PvrDataFormat::Index8 => Some(PixelFormat::Index8),
            _ => None,
        }
    }

    /// The variant of this format carrying a mipmap chain.
    #[inline]
    pub const fn with_mipmaps(self) -> Option<Self> {
        match self {
            PvrDataFormat::SquareTwiddled => Some(PvrDataFormat::SquareTwiddledMipmaps),
            PvrDataFormat::Vq => Some(PvrDataFormat::VqMipmaps),
            PvrDataFormat::SmallVq => Some(PvrDataFormat::SmallVqMipmaps),
            _ if self.has_mipmaps() => Some(self),
            _ => None,
        }
    }

    /// Width/height rules of the format.
    pub const fn shape(self) -> ShapeConstraint {
        let base = ShapeConstraint {
            power_of_two: true,
            square: true,
            min: 8,
            max: 1024,
        };
        match self {
            PvrDataFormat::SmallVq | PvrDataFormat::SmallVqMipmaps => base.with_bounds(8, 64),
            PvrDataFormat::Rectangle | PvrDataFormat::RectangleTwiddled => ShapeConstraint {
                square: false,
                ..base
            },
            PvrDataFormat::Stride => ShapeConstraint {
                power_of_two: false,
                square: false,
                ..base
            },
            _ => base,
        }
    }

    /// Entries in the codebook of a vector-quantized texture `width` pixels wide.
    pub const fn codebook_entries(self, width: u32) -> usize {
        match self {
            PvrDataFormat::SmallVq => match width {
                0..=16 => 16,
                17..=32 => 32,
                33..=64 => 128,
                _ => 256,
            },
            PvrDataFormat::SmallVqMipmaps => match width {
                0..=16 => 16,
                17..=32 => 128,
                _ => 256,
            },
            _ => 256,
        }
    }

    /// Bytes of padding ahead of the smallest mipmap level.
    pub const fn mipmap_padding(self, bits_per_pixel: u8) -> usize {
        match self {
            PvrDataFormat::SquareTwiddledMipmaps => bits_per_pixel as usize / 8,
            PvrDataFormat::SquareTwiddledMipmapsAlt => bits_per_pixel as usize / 8 * 3,
            PvrDataFormat::VqMipmaps | PvrDataFormat::SmallVqMipmaps => 1,
            _ => 0,
        }
    }
}

impl From<PvrDataFormat> for u8 {
    fn from(value: PvrDataFormat) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for PvrDataFormat {
    type Error = TextureError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::SquareTwiddled),
            0x02 => Ok(Self::SquareTwiddledMipmaps),
            0x03 => Ok(Self::Vq),
            0x04 => Ok(Self::VqMipmaps),
            0x05 => Ok(Self::Index4),
            0x07 => Ok(Self::Index8),
            0x09 => Ok(Self::Rectangle),
            0x0B => Ok(Self::Stride),
            0x0D => Ok(Self::RectangleTwiddled),
            0x10 => Ok(Self::SmallVq),
            0x11 => Ok(Self::SmallVqMipmaps),
            0x12 => Ok(Self::SquareTwiddledMipmapsAlt),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Data,
                code: value as u16,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(PvrDataFormat::SmallVq, 8, 16)]
    #[case(PvrDataFormat::SmallVq, 32, 32)]
    #[case(PvrDataFormat::SmallVq, 64, 128)]
    #[case(PvrDataFormat::SmallVqMipmaps, 16, 16)]
    #[case(PvrDataFormat::SmallVqMipmaps, 32, 128)]
    #[case(PvrDataFormat::SmallVqMipmaps, 64, 256)]
    #[case(PvrDataFormat::Vq, 8, 256)]
    fn codebook_size_follows_width(
        #[case] format: PvrDataFormat,
        #[case] width: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(format.codebook_entries(width), expected);
    }

    #[rstest]
    #[case(PvrDataFormat::SquareTwiddledMipmaps, 16, 2)]
    #[case(PvrDataFormat::SquareTwiddledMipmapsAlt, 16, 6)]
    #[case(PvrDataFormat::SquareTwiddledMipmaps, 32, 4)]
    #[case(PvrDataFormat::VqMipmaps, 16, 1)]
    #[case(PvrDataFormat::SquareTwiddled, 16, 0)]
    fn mipmap_padding_sizes(#[case] format: PvrDataFormat, #[case] bpp: u8, #[case] expected: usize) {
        assert_eq!(format.mipmap_padding(bpp), expected);
    }

    #[rstest]
    #[case(PvrDataFormat::SquareTwiddled, 16, 8, false)]
    #[case(PvrDataFormat::RectangleTwiddled, 16, 8, true)]
    #[case(PvrDataFormat::Stride, 24, 8, true)]
    #[case(PvrDataFormat::Rectangle, 24, 8, false)]
    #[case(PvrDataFormat::SmallVq, 128, 128, false)]
    #[case(PvrDataFormat::Vq, 128, 128, true)]
    fn shape_constraints(
        #[case] format: PvrDataFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] ok: bool,
    ) {
        assert_eq!(format.shape().validate(width, height).is_ok(), ok);
    }

    #[test]
    fn yuv_and_bump_have_no_codec() {
        for code in [0x03u8, 0x04] {
            let format = PvrPixelFormat::try_from(code).unwrap();
            assert_eq!(
                format.require_pixel_format(),
                Err(TextureError::UnsupportedCodec {
                    kind: CodecKind::Pixel,
                    code: code as u16
                })
            );
        }
    }

    #[test]
    fn codes_round_trip() {
        for code in 0..=0xFFu8 {
            if let Ok(format) = PvrDataFormat::try_from(code) {
                assert_eq!(u8::from(format), code);
            }
            if let Ok(format) = PvrPixelFormat::try_from(code) {
                assert_eq!(u8::from(format), code);
            }
        }
    }

    #[test]
    fn mipmap_variants() {
        assert_eq!(
            PvrDataFormat::Vq.with_mipmaps(),
            Some(PvrDataFormat::VqMipmaps)
        );
        assert_eq!(
            PvrDataFormat::SquareTwiddledMipmapsAlt.with_mipmaps(),
            Some(PvrDataFormat::SquareTwiddledMipmapsAlt)
        );
        assert_eq!(PvrDataFormat::Index8.with_mipmaps(), None);
    }
}
