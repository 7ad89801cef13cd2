use super::constants::*;
use super::formats::{GvrDataFlags, GvrDataFormat};
use super::parse_gvr::GvrHeader;
use crate::gvp::write_gvp;
use crate::settings::GvrEncodeSettings;
use alloc::vec::Vec;
use ctex_common::layout::tile::TileSwizzle;
use ctex_common::mipmap::build_chain;
use ctex_common::{
    CodecKind, EncodedTexture, Endian, Palette, PaletteSource, RgbaImage, TextureError, TextureResult,
};
use ctex_quantize::{quantize, QuantizeSettingsBuilder};

/// Encodes `image` as a GVR texture.
///
/// Indexed formats quantize the image to the format's palette size. The palette is
/// embedded unless the options ask for an external one, in which case it is returned as a
/// GVP file alongside the texture.
///
/// # Errors
///
/// - [`TextureError::InvalidDimensions`] unless both sides are powers of two in `8..=1024`.
/// - Setting errors from [`GvrEncodeSettings::validate`].
pub fn encode_gvr(image: &RgbaImage, settings: &GvrEncodeSettings) -> TextureResult<EncodedTexture> {
    settings.validate()?;
    SHAPE.validate(image.width(), image.height())?;

    let format = settings.data_format;
    let options = &settings.options;
    let mut flags = GvrDataFlags::empty();
    let mut body = Vec::new();
    let mut palette_file = None;

    if format.is_indexed() {
        let pixel_format = format.pixel_format();
        let entries = pixel_format.palette_entries();
        let quantized = quantize(
            image,
            &QuantizeSettingsBuilder::new()
                .max_colors(entries as u16)
                .dither(options.dither)
                .build(),
        )?;

        let source = if options.external_palette {
            PaletteSource::External
        } else {
            PaletteSource::Embedded
        };
        let palette = Palette::new(quantized.palette, settings.palette_format.pixel_format(), source)?;
        if options.external_palette {
            flags |= GvrDataFlags::EXTERNAL_PALETTE;
            palette_file = Some(write_gvp(&palette)?);
        } else {
            flags |= GvrDataFlags::INTERNAL_PALETTE;
            body.extend(palette.encode_padded(entries, Endian::Big)?);
        }

        let swizzle = tile_swizzle(format, image.width(), image.height())?;
        let stored = swizzle.swizzle(&quantized.indices)?;
        body.extend(pixel_format.codec().encode_indices(&stored, Endian::Big)?);
    } else {
        body.extend(encode_surface(format, image)?);
        if options.mipmaps {
            flags |= GvrDataFlags::MIPMAPS;
            let chain = build_chain(image)?;
            tracing::debug!(levels = chain.len(), "writing GVR mipmap chain");
            for level in &chain {
                body.extend(encode_surface(format, level)?);
            }
        }
    }

    let header = GvrHeader {
        global_index: options.global_index,
        texture_offset: match options.global_index {
            Some(_) => GLOBAL_INDEX_HEADER_SIZE,
            None => 0,
        },
        declared_length: (body.len() + GVRT_LENGTH_BIAS) as u32,
        palette_format_code: if format.is_indexed() {
            settings.palette_format.into()
        } else {
            0
        },
        flags,
        data_format_code: format.into(),
        width: image.width() as u16,
        height: image.height() as u16,
    };

    let mut texture = Vec::with_capacity(header.data_offset() + body.len());
    header.write_to(&mut texture);
    texture.extend(body);
    Ok(EncodedTexture {
        texture,
        palette: palette_file,
    })
}

#[inline]
fn tile_swizzle(format: GvrDataFormat, width: u32, height: u32) -> TextureResult<TileSwizzle> {
    let (tile_width, tile_height) = format.tile();
    TileSwizzle::new(width, height, tile_width, tile_height)
}

/// Encodes one tiled surface of a direct-color `format`.
pub(crate) fn encode_surface(format: GvrDataFormat, image: &RgbaImage) -> TextureResult<Vec<u8>> {
    let swizzle = tile_swizzle(format, image.width(), image.height())?;
    let stored = swizzle.swizzle(image.pixels())?;
    match format {
        GvrDataFormat::Argb8888 => {
            let mut out = Vec::with_capacity(stored.len() * 4);
            for tile in stored.chunks_exact(16) {
                for pixel in tile {
                    out.extend_from_slice(&[pixel.a, pixel.r]);
                }
                for pixel in tile {
                    out.extend_from_slice(&[pixel.g, pixel.b]);
                }
            }
            Ok(out)
        }
        GvrDataFormat::Dxt1 => Err(TextureError::UnsupportedCodec {
            kind: CodecKind::Data,
            code: format as u16,
        }),
        _ => format.pixel_format().codec().encode_pixels(&stored, Endian::Big),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gvr::decode::decode_surface;
    use crate::gvr::decode_gvr;
    use crate::test_prelude::*;
    use ctex_common::{EncodeOptionsBuilder, GlobalIndex, PaletteSupply, PixelFormat};

    fn settings(data_format: GvrDataFormat) -> GvrEncodeSettings {
        crate::GvrEncodeSettingsBuilder::new()
            .data_format(data_format)
            .build()
    }

    #[test]
    fn opaque_red_rgb565_layout() {
        let image = RgbaImage::filled(16, 16, Color8888::new(255, 0, 0, 255)).unwrap();
        let encoded = encode_gvr(&image, &settings(GvrDataFormat::Rgb565)).unwrap();
        let bytes = &encoded.texture;

        assert!(encoded.palette.is_none());
        assert_eq!(&bytes[0..4], b"GVRT");
        assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 512 + 8);
        assert_eq!(&bytes[0x0C..0x10], &[0, 16, 0, 16]);
        assert_eq!(bytes.len(), 16 + 512);
        assert!(bytes[16..].chunks_exact(2).all(|pixel| pixel == [0xF8, 0x00]));

        let texture = decode_gvr(bytes, &PaletteSupply::None).unwrap();
        assert!(texture.image.pixels().iter().all(|p| p.r == 255 && p.g == 0 && p.b == 0));
    }

    #[rstest]
    #[case(GvrDataFormat::Argb8888)]
    #[case(GvrDataFormat::Rgb5a3)]
    #[case(GvrDataFormat::IntensityA8)]
    fn direct_formats_round_trip_their_own_output(#[case] format: GvrDataFormat) {
        let image = gradient_image(16, 8);
        let first = encode_gvr(&image, &settings(format)).unwrap();
        let decoded = decode_gvr(&first.texture, &PaletteSupply::None).unwrap();
        let second = encode_gvr(&decoded.image, &settings(format)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn argb8888_is_lossless() {
        let image = gradient_image(8, 8);
        let encoded = encode_surface(GvrDataFormat::Argb8888, &image).unwrap();
        assert_eq!(
            decode_surface(GvrDataFormat::Argb8888, &encoded, 8, 8, None).unwrap(),
            image
        );
    }

    #[test]
    fn embedded_palette_precedes_indices() {
        let image = palette_image(8, 8, 4);
        let encoded = encode_gvr(&image, &settings(GvrDataFormat::Index4)).unwrap();
        // 16 palette entries of 2 bytes, then 8x8 4-bit indices.
        assert_eq!(encoded.texture.len(), 16 + 32 + 32);
        assert_eq!(encoded.texture[0x0A], 0x28);

        let texture = decode_gvr(&encoded.texture, &PaletteSupply::None).unwrap();
        assert_eq!(texture.image, image);
        let palette = texture.palette.unwrap();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.format(), PixelFormat::Rgb5a3);
    }

    #[test]
    fn external_palette_is_written_separately() {
        let image = palette_image(8, 8, 8);
        let settings = crate::GvrEncodeSettingsBuilder::new()
            .data_format(GvrDataFormat::Index4)
            .palette_format(crate::GvrPaletteFormat::Rgb565)
            .options(EncodeOptionsBuilder::new().external_palette(true).build())
            .build();
        let encoded = encode_gvr(&image, &settings).unwrap();

        assert_eq!(encoded.texture.len(), 16 + 32);
        assert_eq!(encoded.texture[0x0A], 0x12);
        let gvp = encoded.palette.unwrap();
        let palette = crate::read_gvp(&gvp).unwrap();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.format(), PixelFormat::Rgb565);

        assert_eq!(
            decode_gvr(&encoded.texture, &PaletteSupply::None),
            Err(TextureError::MissingPalette)
        );
        let texture = decode_gvr(&encoded.texture, &PaletteSupply::External(palette)).unwrap();
        assert_eq!(texture.image, image);
    }

    #[test]
    fn mipmaps_follow_base_image() {
        let image = gradient_image(16, 16);
        let settings = crate::GvrEncodeSettingsBuilder::new()
            .data_format(GvrDataFormat::Rgb565)
            .options(EncodeOptionsBuilder::new().mipmaps(true).build())
            .build();
        let encoded = encode_gvr(&image, &settings).unwrap();
        // 16x16, 8x8, 4x4, 2x2 and 1x1 levels; the last two still take a whole tile.
        assert_eq!(encoded.texture.len(), 16 + 512 + 128 + 32 + 32 + 32);

        let texture = decode_gvr(&encoded.texture, &PaletteSupply::None).unwrap();
        let sizes: Vec<_> = texture
            .mipmaps
            .iter()
            .map(|level| (level.width(), level.height()))
            .collect();
        assert_eq!(sizes, vec![(8, 8), (4, 4), (2, 2), (1, 1)]);
    }

    #[test]
    fn global_index_header_is_prepended() {
        let image = gradient_image(8, 8);
        let settings = crate::GvrEncodeSettingsBuilder::new()
            .options(
                EncodeOptionsBuilder::new()
                    .global_index(GlobalIndex::gcix(42))
                    .build(),
            )
            .build();
        let encoded = encode_gvr(&image, &settings).unwrap();
        assert_eq!(&encoded.texture[0..4], b"GCIX");
        assert_eq!(&encoded.texture[16..20], b"GVRT");
        let texture = decode_gvr(&encoded.texture, &PaletteSupply::None).unwrap();
        assert_eq!(texture.info.global_index, Some(GlobalIndex::gcix(42)));
    }

    #[rstest]
    #[case(4, 8)]
    #[case(12, 8)]
    #[case(2048, 8)]
    fn invalid_dimensions_are_rejected(#[case] width: u32, #[case] height: u32) {
        let image = RgbaImage::filled(width, height, Color8888::BLACK).unwrap();
        assert!(matches!(
            encode_gvr(&image, &settings(GvrDataFormat::Rgb565)),
            Err(TextureError::InvalidDimensions { .. })
        ));
    }
}
