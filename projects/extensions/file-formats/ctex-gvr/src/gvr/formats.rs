//! Enumerants of the `GVRT` header.

use bitflags::bitflags;
use ctex_common::block::DxtVariant;
use ctex_common::{CodecKind, DataLayout, PixelFormat, TextureError};

bitflags! {
    /// Low nibble of header byte `0x0A`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GvrDataFlags: u8 {
        /// A mipmap chain follows the base image.
        const MIPMAPS = 0x01;
        /// The palette lives in a separate GVP file.
        const EXTERNAL_PALETTE = 0x02;
        /// The palette precedes the pixel data.
        const INTERNAL_PALETTE = 0x08;
    }
}

/// Palette entry format, stored in the high nibble of header byte `0x0A`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GvrPaletteFormat {
    /// 8-bit intensity plus 8-bit alpha.
    IntensityA8 = 0x00,
    /// 16-bit RGB565.
    Rgb565 = 0x01,
    /// 16-bit RGB5A3.
    #[default]
    Rgb5a3 = 0x02,
}

impl GvrPaletteFormat {
    /// Codec used for the palette entries.
    #[inline]
    pub const fn pixel_format(self) -> PixelFormat {
        match self {
            GvrPaletteFormat::IntensityA8 => PixelFormat::IntensityAlpha8,
            GvrPaletteFormat::Rgb565 => PixelFormat::Rgb565,
            GvrPaletteFormat::Rgb5a3 => PixelFormat::Rgb5a3,
        }
    }

    /// The palette format storing entries as `format`, if GVR has one.
    #[inline]
    pub const fn from_pixel_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::IntensityAlpha8 => Some(GvrPaletteFormat::IntensityA8),
            PixelFormat::Rgb565 => Some(GvrPaletteFormat::Rgb565),
            PixelFormat::Rgb5a3 => Some(GvrPaletteFormat::Rgb5a3),
            _ => None,
        }
    }
}

impl From<GvrPaletteFormat> for u8 {
    fn from(value: GvrPaletteFormat) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for GvrPaletteFormat {
    type Error = TextureError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::IntensityA8),
            0x01 => Ok(Self::Rgb565),
            0x02 => Ok(Self::Rgb5a3),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Palette,
                code: value as u16,
            }),
        }
    }
}

/// Pixel data format, header byte `0x0B`.
///
/// Every format is stored in fixed-size tiles, row-major within each tile, big-endian.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GvrDataFormat {
    /// 4-bit intensity in 8x8 tiles.
    Intensity4 = 0x00,
    /// 8-bit intensity in 8x4 tiles.
    Intensity8 = 0x01,
    /// 4-bit intensity and alpha in 8x4 tiles.
    IntensityA4 = 0x02,
    /// 8-bit intensity and alpha in 4x4 tiles.
    IntensityA8 = 0x03,
    /// RGB565 in 4x4 tiles.
    #[default]
    Rgb565 = 0x04,
    /// RGB5A3 in 4x4 tiles.
    Rgb5a3 = 0x05,
    /// ARGB8888 in 4x4 tiles, split into an AR plane and a GB plane.
    Argb8888 = 0x06,
    /// 4-bit palette indices in 8x8 tiles.
    Index4 = 0x08,
    /// 8-bit palette indices in 8x4 tiles.
    Index8 = 0x09,
    /// GameCube-layout DXT1 in 8x8 tiles of four blocks. Decode only.
    Dxt1 = 0x0E,
}

impl GvrDataFormat {
    /// Pixel codec of the format. DXT1 reports the format of its endpoints.
    #[inline]
    pub const fn pixel_format(self) -> PixelFormat {
        match self {
            GvrDataFormat::Intensity4 => PixelFormat::Intensity4,
            GvrDataFormat::Intensity8 => PixelFormat::Intensity8,
            GvrDataFormat::IntensityA4 => PixelFormat::IntensityAlpha4,
            GvrDataFormat::IntensityA8 => PixelFormat::IntensityAlpha8,
            GvrDataFormat::Rgb565 | GvrDataFormat::Dxt1 => PixelFormat::Rgb565,
            GvrDataFormat::Rgb5a3 => PixelFormat::Rgb5a3,
            GvrDataFormat::Argb8888 => PixelFormat::Argb8888,
            GvrDataFormat::Index4 => PixelFormat::Index4,
            GvrDataFormat::Index8 => PixelFormat::Index8,
        }
    }

    /// Tile width and height in pixels.
    #[inline]
    pub const fn tile(self) -> (u32, u32) {
        match self {
            GvrDataFormat::Intensity4 | GvrDataFormat::Index4 | GvrDataFormat::Dxt1 => (8, 8),
            GvrDataFormat::Intensity8 | GvrDataFormat::IntensityA4 | GvrDataFormat::Index8 => {
                (8, 4)
            }
            GvrDataFormat::IntensityA8
            | GvrDataFormat::Rgb565
            | GvrDataFormat::Rgb5a3
            | GvrDataFormat::Argb8888 => (4, 4),
        }
    }

    /// Spatial layout of the format.
    #[inline]
    pub const fn layout(self) -> DataLayout {
        match self {
            GvrDataFormat::Dxt1 => DataLayout::CompressedBlock(DxtVariant::Dxt1),
            _ => {
                let (tile_width, tile_height) = self.tile();
                DataLayout::TiledBlock {
                    tile_width: tile_width as u8,
                    tile_height: tile_height as u8,
                }
            }
        }
    }

    /// Whether the format stores palette indices.
    #[inline]
    pub const fn is_indexed(self) -> bool {
        matches!(self, GvrDataFormat::Index4 | GvrDataFormat::Index8)
    }

    /// Whether the format can be written.
    #[inline]
    pub const fn can_encode(self) -> bool {
        !matches!(self, GvrDataFormat::Dxt1)
    }

    /// Bytes a `width` x `height` surface occupies, padding included.
    pub fn surface_len(self, width: u32, height: u32) -> usize {
        let (tile_width, tile_height) = self.tile();
        let stored = width.div_ceil(tile_width) as usize
            * tile_width as usize
            * height.div_ceil(tile_height) as usize
            * tile_height as usize;
        match self {
            GvrDataFormat::Dxt1 => stored / 2,
            _ => stored * self.pixel_format().bits_per_pixel() as usize / 8,
        }
    }
}

impl From<GvrDataFormat> for u8 {
    fn from(value: GvrDataFormat) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for GvrDataFormat {
    type Error = TextureError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Intensity4),
            0x01 => Ok(Self::Intensity8),
            0x02 => Ok(Self::IntensityA4),
            0x03 => Ok(Self::IntensityA8),
            0x04 => Ok(Self::Rgb565),
            0x05 => Ok(Self::Rgb5a3),
            0x06 => Ok(Self::Argb8888),
            0x08 => Ok(Self::Index4),
            0x09 => Ok(Self::Index8),
            0x0E => Ok(Self::Dxt1),
            _ => Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Data,
                code: value as u16,
            }),
        }
    }
}
