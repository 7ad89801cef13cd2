//! Pixel formats and their codecs.
//!
//! Every [`PixelFormat`] resolves to one [`PixelCodec`] descriptor in a static registry
//! indexed by the format's ordinal. Direct-color formats convert packed values to and from
//! [`Color8888`]; indexed formats store palette indices and resolve colors through a
//! [`Palette`](crate::palette::Palette).

mod channels;
mod codecs;
mod stream;

pub use stream::{read_value, stream_len, write_value, Endian};

use crate::color_8888::Color8888;
use crate::error::{require_len, CodecKind, TextureError, TextureResult};
use alloc::vec;
use alloc::vec::Vec;
use derive_enum_all_values::AllValues;

/// Highest alpha value [`PixelFormat::Rgb5a3`] encodes with its 3-bit alpha arm.
///
/// Colors with a larger alpha are written through the opaque 5-5-5 arm, dropping alpha.
/// The boundary matches the hardware encoders and must stay bit-exact.
pub const RGB5A3_ALPHA_THRESHOLD: u8 = 0xDA;

/// A packed pixel encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
#[repr(u8)]
pub enum PixelFormat {
    /// 4-bit intensity.
    Intensity4 = 0,
    /// 8-bit intensity.
    Intensity8 = 1,
    /// 4-bit alpha (high nibble), 4-bit intensity.
    IntensityAlpha4 = 2,
    /// 8-bit alpha (high byte), 8-bit intensity.
    IntensityAlpha8 = 3,
    /// 16-bit, red in the top 5 bits.
    Rgb565 = 4,
    /// 16-bit, blue in the top 5 bits.
    Bgr565 = 5,
    /// 16-bit, 1-bit alpha then red, green, blue.
    Argb1555 = 6,
    /// 16-bit, 1-bit alpha then blue, green, red.
    Abgr1555 = 7,
    /// 16-bit, unused top bit then red, green, blue. Always opaque.
    Rgb555 = 8,
    /// 16-bit, 4 bits per channel, alpha on top.
    Argb4444 = 9,
    /// 16-bit, 4 bits per channel, alpha on top, blue before red.
    Abgr4444 = 10,
    /// 16-bit hybrid: top bit set selects opaque 5-5-5, clear selects 3-4-4-4 with alpha.
    Rgb5a3 = 11,
    /// 32-bit `0xAARRGGBB`.
    Argb8888 = 12,
    /// 32-bit `0xAABBGGRR`.
    Abgr8888 = 13,
    /// 4-bit palette index.
    Index4 = 14,
    /// 8-bit palette index.
    Index8 = 15,
}

/// Conversion functions of a direct-color format.
#[derive(Clone, Copy)]
struct ColorConversion {
    decode: fn(u32) -> Color8888,
    encode: fn(Color8888) -> u32,
}

/// Static description of how one [`PixelFormat`] is stored.
#[derive(Clone, Copy)]
pub struct PixelCodec {
    format: PixelFormat,
    bits_per_pixel: u8,
    palette_entries: u16,
    can_encode: bool,
    conversion: Option<ColorConversion>,
}

impl core::fmt::Debug for PixelCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelCodec")
            .field("format", &self.format)
            .field("bits_per_pixel", &self.bits_per_pixel)
            .field("palette_entries", &self.palette_entries)
            .field("can_encode", &self.can_encode)
            .finish()
    }
}

const fn direct(
    format: PixelFormat,
    bits_per_pixel: u8,
    decode: fn(u32) -> Color8888,
    encode: fn(Color8888) -> u32,
) -> PixelCodec {
    PixelCodec {
        format,
        bits_per_pixel,
        palette_entries: 0,
        can_encode: true,
        conversion: Some(ColorConversion { decode, encode }),
    }
}

const fn indexed(format: PixelFormat, bits_per_pixel: u8) -> PixelCodec {
    PixelCodec {
        format,
        bits_per_pixel,
        palette_entries: 1 << bits_per_pixel,
        can_encode: true,
        conversion: None,
    }
}

/// Codec registry, indexed by [`PixelFormat`] ordinal.
static PIXEL_CODECS: [PixelCodec; 16] = {
    use codecs::*;
    use PixelFormat::*;
    [
        direct(Intensity4, 4, decode_i4, encode_i4),
        direct(Intensity8, 8, decode_i8, encode_i8),
        direct(IntensityAlpha4, 8, decode_ia4, encode_ia4),
        direct(IntensityAlpha8, 16, decode_ia8, encode_ia8),
        direct(Rgb565, 16, decode_rgb565, encode_rgb565),
        direct(Bgr565, 16, decode_bgr565, encode_bgr565),
        direct(Argb1555, 16, decode_argb1555, encode_argb1555),
        direct(Abgr1555, 16, decode_abgr1555, encode_abgr1555),
        direct(Rgb555, 16, decode_rgb555, encode_rgb555),
        direct(Argb4444, 16, decode_argb4444, encode_argb4444),
        direct(Abgr4444, 16, decode_abgr4444, encode_abgr4444),
        direct(Rgb5a3, 16, decode_rgb5a3, encode_rgb5a3),
        direct(Argb8888, 32, decode_argb8888, encode_argb8888),
        direct(Abgr8888, 32, decode_abgr8888, encode_abgr8888),
        indexed(Index4, 4),
        indexed(Index8, 8),
    ]
};

impl PixelFormat {
    /// The codec descriptor for this format.
    #[inline]
    pub fn codec(self) -> &'static PixelCodec {
        &PIXEL_CODECS[self as usize]
    }

    /// Bits used by one stored pixel.
    #[inline]
    pub fn bits_per_pixel(self) -> u8 {
        self.codec().bits_per_pixel
    }

    /// Maximum palette entries addressable; 0 for direct-color formats.
    #[inline]
    pub fn palette_entries(self) -> usize {
        self.codec().palette_entries as usize
    }

    /// Whether pixels are palette indices.
    #[inline]
    pub fn is_indexed(self) -> bool {
        self.codec().palette_entries != 0
    }

    /// Whether the format can be produced by the encoder.
    #[inline]
    pub fn can_encode(self) -> bool {
        self.codec().can_encode
    }
}

impl PixelCodec {
    /// The format this codec describes.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bits used by one stored pixel.
    #[inline]
    pub fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    /// Maximum palette entries addressable; 0 for direct-color formats.
    #[inline]
    pub fn palette_entries(&self) -> usize {
        self.palette_entries as usize
    }

    /// Whether the format can be produced by the encoder.
    #[inline]
    pub fn can_encode(&self) -> bool {
        self.can_encode
    }

    /// Decodes one packed value. `None` for indexed formats, which need a palette.
    #[inline]
    pub fn decode(&self, value: u32) -> Option<Color8888> {
        self.conversion.map(|conversion| (conversion.decode)(value))
    }

    /// Encodes one color. `None` for indexed formats, which need quantization first.
    #[inline]
    pub fn encode(&self, color: Color8888) -> Option<u32> {
        self.conversion.map(|conversion| (conversion.encode)(color))
    }

    /// Decodes `count` consecutive pixels from `data`.
    ///
    /// Indexed formats look their colors up in `palette`.
    ///
    /// # Errors
    ///
    /// - [`TextureError::InvalidFormat`] if `data` is too short.
    /// - [`TextureError::MissingPalette`] if the format is indexed and no palette was given.
    /// - [`TextureError::PaletteIndexOutOfRange`] if an index has no palette entry.
    pub fn decode_pixels(
        &self,
        data: &[u8],
        count: usize,
        endian: Endian,
        palette: Option<&[Color8888]>,
    ) -> TextureResult<Vec<Color8888>> {
        require_len(data, stream_len(self.bits_per_pixel, count))?;
        match self.conversion {
            Some(conversion) => Ok((0..count)
                .map(|i| (conversion.decode)(read_value(data, self.bits_per_pixel, i, endian)))
                .collect()),
            None => {
                let palette = palette.ok_or(TextureError::MissingPalette)?;
                (0..count)
                    .map(|i| {
                        let index = read_value(data, self.bits_per_pixel, i, endian) as usize;
                        palette
                            .get(index)
                            .copied()
                            .ok_or(TextureError::PaletteIndexOutOfRange {
                                index,
                                entries: palette.len(),
                            })
                    })
                    .collect()
            }
        }
    }

    /// Reads `count` raw palette indices from `data`.
    pub fn decode_indices(
        &self,
        data: &[u8],
        count: usize,
        endian: Endian,
    ) -> TextureResult<Vec<u8>> {
        self.require_indexed()?;
        require_len(data, stream_len(self.bits_per_pixel, count))?;
        Ok((0..count)
            .map(|i| read_value(data, self.bits_per_pixel, i, endian) as u8)
            .collect())
    }

    /// Encodes direct-color pixels into a packed stream.
    ///
    /// # Errors
    ///
    /// [`TextureError::UnsupportedCodec`] for indexed or decode-only formats.
    pub fn encode_pixels(&self, pixels: &[Color8888], endian: Endian) -> TextureResult<Vec<u8>> {
        let conversion = match self.conversion {
            Some(conversion) if self.can_encode => conversion,
            _ => {
                return Err(TextureError::UnsupportedCodec {
                    kind: CodecKind::Pixel,
                    code: self.format as u16,
                })
            }
        };

        let mut out = vec![0u8; stream_len(self.bits_per_pixel, pixels.len())];
        for (i, &pixel) in pixels.iter().enumerate() {
            write_value(&mut out, self.bits_per_pixel, i, (conversion.encode)(pixel), endian);
        }
        Ok(out)
    }

    /// Packs palette indices into a stream.
    ///
    /// # Errors
    ///
    /// - [`TextureError::UnsupportedCodec`] for direct-color formats.
    /// - [`TextureError::PaletteIndexOutOfRange`] if an index does not fit the format.
    pub fn encode_indices(&self, indices: &[u8], endian: Endian) -> TextureResult<Vec<u8>> {
        self.require_indexed()?;
        let mut out = vec![0u8; stream_len(self.bits_per_pixel, indices.len())];
        for (i, &index) in indices.iter().enumerate() {
            if index as u16 >= self.palette_entries {
                return Err(TextureError::PaletteIndexOutOfRange {
                    index: index as usize,
                    entries: self.palette_entries as usize,
                });
            }
            write_value(&mut out, self.bits_per_pixel, i, index as u32, endian);
        }
        Ok(out)
    }

    fn require_indexed(&self) -> TextureResult<()> {
        if self.palette_entries == 0 {
            return Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                code: self.format as u16,
            });
        }
        Ok(())
    }
}
