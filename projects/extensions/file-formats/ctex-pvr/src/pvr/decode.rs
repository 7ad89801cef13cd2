use super::formats::PvrDataFormat;
use super::parse_pvr::parse_pvr;
use alloc::vec::Vec;
use ctex_common::layout::twiddle::Twiddler;
use ctex_common::layout::vq::{self, VqBlock};
use ctex_common::layout::DataLayout;
use ctex_common::mipmap::level_dimensions;
use ctex_common::pixel::stream_len;
use ctex_common::{Color8888, Endian, PaletteSupply, PixelCodec, RgbaImage, Texture, TextureResult};

/// Decodes a PVR texture.
///
/// Indexed textures always take their palette from `supply`. Mipmap levels are returned
/// largest first.
///
/// # Errors
///
/// - Header errors from [`parse_pvr`].
/// - [`TextureError::UnsupportedCodec`] for unknown codes, YUV and bump maps.
/// - [`TextureError::InvalidDimensions`] if the header's sides do not fit the data format.
/// - [`TextureError::MissingPalette`] for an indexed texture when `supply` has no palette.
///
/// [`TextureError::UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
/// [`TextureError::InvalidDimensions`]: ctex_common::TextureError::InvalidDimensions
/// [`TextureError::MissingPalette`]: ctex_common::TextureError::MissingPalette
pub fn decode_pvr(data: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
    let header = parse_pvr(data)?;
    let info = header.info();
    let data_format = header.data_format()?;
    data_format.shape().validate(info.width, info.height)?;
    let body = &data[header.data_offset()..header.data_end()];
    if data.len() > header.data_end() {
        tracing::warn!(
            trailing = data.len() - header.data_end(),
            "ignoring bytes after PVR texture data"
        );
    }
    let (width, height) = (info.width, info.height);

    if let Some(index_format) = data_format.index_format() {
        let palette_format = info.require_palette_format()?;
        let palette = supply.resolve(index_format.palette_entries(), palette_format)?;
        palette.check_capacity(index_format)?;
        let image = decode_surface(
            data_format,
            index_format.codec(),
            body,
            width,
            height,
            Some(palette.entries()),
        )?;
        return Texture::new(info, image, Vec::new(), Some(palette));
    }

    let codec = info.require_pixel_format()?.codec();
    let (image, mipmaps) = if data_format.is_vq() {
        decode_vq(data_format, codec, body, width, height)?
    } else {
        let mut cursor = 0;
        let mut mipmaps = Vec::new();
        if data_format.has_mipmaps() {
            cursor = data_format.mipmap_padding(codec.bits_per_pixel());
            for (level_width, level_height) in smallest_first(width, height) {
                let level = remaining(body, cursor);
                mipmaps.push(decode_surface(data_format, codec, level, level_width, level_height, None)?);
                cursor += stream_len(codec.bits_per_pixel(), (level_width * level_height) as usize);
            }
            mipmaps.reverse();
        }
        let image = decode_surface(data_format, codec, remaining(body, cursor), width, height, None)?;
        (image, mipmaps)
    };
    Texture::new(info, image, mipmaps, None)
}

#[inline]
fn remaining(body: &[u8], cursor: usize) -> &[u8] {
    body.get(cursor..).unwrap_or_default()
}

/// Mipmap level sizes in on-disk order.
fn smallest_first(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let levels: Vec<_> = level_dimensions(width, height).collect();
    levels.into_iter().rev()
}

/// Decodes one twiddled or linear surface.
pub(crate) fn decode_surface(
    data_format: PvrDataFormat,
    codec: &PixelCodec,
    data: &[u8],
    width: u32,
    height: u32,
    palette: Option<&[Color8888]>,
) -> TextureResult<RgbaImage> {
    let count = width as usize * height as usize;
    // 4-bit indices hold the first pixel in the low nibble.
    let stored = codec.decode_pixels(data, count, Endian::Little, palette)?;
    let pixels = match data_format.layout() {
        DataLayout::Linear => stored,
        _ => Twiddler::rectangle(width, height)?.untwiddle(&stored)?,
    };
    RgbaImage::new(width, height, pixels)
}

/// Decodes a codebook followed by the (optional) mipmap indices and the base indices.
fn decode_vq(
    data_format: PvrDataFormat,
    codec: &PixelCodec,
    body: &[u8],
    width: u32,
    height: u32,
) -> TextureResult<(RgbaImage, Vec<RgbaImage>)> {
    let entries = data_format.codebook_entries(width);
    let codebook = decode_codebook(codec, body, entries)?;
    let mut cursor = stream_len(codec.bits_per_pixel(), entries * 4);

    let mut mipmaps = Vec::new();
    if data_format.has_mipmaps() {
        cursor += data_format.mipmap_padding(codec.bits_per_pixel());
        for (level_width, level_height) in smallest_first(width, height) {
            let indices = remaining(body, cursor);
            mipmaps.push(vq::decode(&codebook, indices, level_width, level_height)?);
            cursor += vq::index_count(level_width, level_height);
        }
        mipmaps.reverse();
    }

    let image = vq::decode(&codebook, remaining(body, cursor), width, height)?;
    Ok((image, mipmaps))
}

fn decode_codebook(codec: &PixelCodec, data: &[u8], entries: usize) -> TextureResult<Vec<VqBlock>> {
    let pixels = codec.decode_pixels(data, entries * 4, Endian::Little, None)?;
    Ok(pixels
        .chunks_exact(4)
        .map(|entry| [entry[0], entry[1], entry[2], entry[3]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use crate::{encode_pvr, PvrEncodeSettingsBuilder, PvrPixelFormat};
    use ctex_common::{PixelFormat, TextureError};

    /// Encodes a valid texture of `data_format`, then rewrites the header's sides.
    fn with_sides(data_format: PvrDataFormat, side: (u32, u32), patched: (u16, u16)) -> Vec<u8> {
        let settings = PvrEncodeSettingsBuilder::new()
            .pixel_format(PvrPixelFormat::Rgb565)
            .data_format(data_format)
            .build();
        let image = palette_image(side.0, side.1, 8);
        let mut bytes = encode_pvr(&image, &settings).unwrap().texture;
        bytes[0x0C..0x0E].copy_from_slice(&patched.0.to_le_bytes());
        bytes[0x0E..0x10].copy_from_slice(&patched.1.to_le_bytes());
        bytes
    }

    #[rstest]
    #[case::vq_mipmaps_wide(PvrDataFormat::VqMipmaps, (16, 16), (32, 16))]
    #[case::vq_mipmaps_tall(PvrDataFormat::VqMipmaps, (16, 16), (16, 32))]
    #[case::vq_not_power_of_two(PvrDataFormat::Vq, (16, 16), (16, 12))]
    #[case::small_vq_too_large(PvrDataFormat::SmallVq, (16, 16), (128, 128))]
    #[case::twiddled_not_square(PvrDataFormat::SquareTwiddled, (16, 16), (16, 8))]
    #[case::twiddled_mipmaps_not_square(PvrDataFormat::SquareTwiddledMipmaps, (16, 16), (8, 16))]
    #[case::index4_not_square(PvrDataFormat::Index4, (16, 16), (16, 8))]
    #[case::rectangle_not_power_of_two(PvrDataFormat::Rectangle, (16, 8), (24, 8))]
    #[case::rectangle_twiddled_not_power_of_two(PvrDataFormat::RectangleTwiddled, (16, 8), (12, 8))]
    #[case::stride_too_small(PvrDataFormat::Stride, (24, 8), (4, 8))]
    fn header_sides_outside_the_format_are_invalid(
        #[case] data_format: PvrDataFormat,
        #[case] side: (u32, u32),
        #[case] patched: (u16, u16),
    ) {
        let bytes = with_sides(data_format, side, patched);
        assert!(matches!(
            decode_pvr(&bytes, &PaletteSupply::None),
            Err(TextureError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_palette_overflows_index4() {
        let bytes = with_sides(PvrDataFormat::Index4, (8, 8), (8, 8));
        let palette = ctex_common::Palette::new(
            vec![Color8888::BLACK; 256],
            PixelFormat::Rgb565,
            ctex_common::PaletteSource::External,
        )
        .unwrap();
        assert_eq!(
            decode_pvr(&bytes, &PaletteSupply::External(palette)),
            Err(TextureError::PaletteOverflow { entries: 256, max: 16 })
        );
    }

    #[test]
    fn twiddled_surface_reorders_pixels() {
        // 2x2 twiddled order is (0,0), (0,1), (1,0), (1,1).
        let data = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF, 0xFF];
        let codec = PixelFormat::Rgb565.codec();
        let image = decode_surface(PvrDataFormat::SquareTwiddled, codec, &data, 2, 2, None).unwrap();
        assert_eq!(
            image.pixels(),
            &[
                Color8888::new(255, 0, 0, 255),
                Color8888::new(0, 0, 255, 255),
                Color8888::new(0, 255, 0, 255),
                Color8888::new(255, 255, 255, 255),
            ]
        );
    }

    #[test]
    fn linear_surface_is_row_major() {
        let data = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF, 0xFF];
        let codec = PixelFormat::Rgb565.codec();
        let image = decode_surface(PvrDataFormat::Rectangle, codec, &data, 2, 2, None).unwrap();
        assert_eq!(image.pixels()[1], Color8888::new(0, 255, 0, 255));
    }

    #[test]
    fn index4_reads_low_nibble_first() {
        let palette = [Color8888::BLACK, Color8888::gray(255)];
        let codec = PixelFormat::Index4.codec();
        // Twiddled positions 0 and 1 are (0,0) and (0,1).
        let image =
            decode_surface(PvrDataFormat::Index4, codec, &[0x10, 0x00], 2, 2, Some(&palette)).unwrap();
        assert_eq!(image.pixels()[0], Color8888::BLACK);
        assert_eq!(image.pixels()[2], Color8888::gray(255));
    }

    #[test]
    fn codebook_entries_keep_twiddled_order() {
        let data = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0xFF, 0xFF];
        let codebook = decode_codebook(PixelFormat::Rgb565.codec(), &data, 1).unwrap();
        let image = vq::decode(&codebook, &[0], 2, 2).unwrap();
        assert_eq!(image.pixels()[2], Color8888::new(0, 255, 0, 255));
    }
}
