use super::chunks::{write_container_chunk, write_leaf_chunk, ChunkKind};
use super::constants::*;
use super::formats::GimPaletteFormat;
use super::metadata::write_metadata;
use super::parse_gim::GimBlock;
use crate::settings::GimEncodeSettings;
use alloc::vec::Vec;
use ctex_common::block;
use ctex_common::layout::tile::TileSwizzle;
use ctex_common::layout::{ShapeConstraint, MAX_TEXTURE_SIDE};
use ctex_common::pixel::stream_len;
use ctex_common::{EncodedTexture, Endian, Palette, PaletteSource, RgbaImage, TextureResult};
use ctex_quantize::{quantize, QuantizeSettingsBuilder};

const SHAPE: ShapeConstraint = ShapeConstraint {
    power_of_two: false,
    square: false,
    min: 1,
    max: MAX_TEXTURE_SIDE,
};

/// Encodes `image` as a GIM texture.
///
/// Indexed formats quantize the image and embed a palette of 16 or 256 entries. Plain
/// payloads are written swizzled; DXT payloads are written as linear blocks.
///
/// # Errors
///
/// - Setting errors from [`GimEncodeSettings::validate`].
/// - [`TextureError::InvalidDimensions`] for sides outside `1..=1024`.
///
/// [`TextureError::InvalidDimensions`]: ctex_common::TextureError::InvalidDimensions
pub fn encode_gim(image: &RgbaImage, settings: &GimEncodeSettings) -> TextureResult<EncodedTexture> {
    settings.validate()?;
    SHAPE.validate(image.width(), image.height())?;

    let format = settings.pixel_format;
    let mut palette_chunk = None;
    let (payload, pixel_order) = if let Some(variant) = format.dxt_variant() {
        (block::encode_image(variant, image), 0)
    } else {
        let pixel_format = format.require_pixel_format()?;
        let codec = pixel_format.codec();
        let width = image.width() as usize;
        let rows = if pixel_format.is_indexed() {
            let entries = pixel_format.palette_entries();
            let quantized = quantize(
                image,
                &QuantizeSettingsBuilder::new()
                    .max_colors(entries as u16)
                    .dither(settings.options.dither)
                    .build(),
            )?;
            let palette = Palette::new(
                quantized.palette,
                settings.palette_format.pixel_format(),
                PaletteSource::Embedded,
            )?;
            palette_chunk = Some(palette_block(&palette, settings.palette_format, entries)?);
            encode_rows(&quantized.indices, width, |row| {
                codec.encode_indices(row, Endian::Little)
            })?
        } else {
            encode_rows(image.pixels(), width, |row| {
                codec.encode_pixels(row, Endian::Little)
            })?
        };
        let row_bytes = stream_len(codec.bits_per_pixel(), width);
        let swizzle = TileSwizzle::new(row_bytes as u32, image.height(), PITCH_ALIGN, HEIGHT_ALIGN)?;
        (swizzle.swizzle(&rows)?, ORDER_SWIZZLED)
    };

    let image_block = GimBlock {
        format_code: format.into(),
        pixel_order,
        width: image.width() as u16,
        height: image.height() as u16,
        bits_per_pixel: format.bits_per_pixel(),
        payload: 0..payload.len(),
    };
    let mut body = Vec::with_capacity(BLOCK_HEADER_SIZE + payload.len());
    image_block.write(&payload, &mut body);

    let mut picture = Vec::new();
    write_leaf_chunk(ChunkKind::Texture, &body, &mut picture);
    if let Some(palette) = palette_chunk {
        write_leaf_chunk(ChunkKind::Palette, &palette, &mut picture);
    }
    let mut root = Vec::new();
    write_container_chunk(ChunkKind::MetadataOffset, &picture, &mut root);
    if let Some(metadata) = &settings.metadata {
        write_leaf_chunk(ChunkKind::Metadata, &write_metadata(metadata), &mut root);
    }

    let mut texture = Vec::with_capacity(FILE_HEADER_SIZE + CHUNK_HEADER_SIZE + root.len());
    texture.extend_from_slice(&GIM_SIGNATURE);
    texture.extend_from_slice(&[0; 4]);
    write_container_chunk(ChunkKind::EndOfFile, &root, &mut texture);
    tracing::debug!(
        len = texture.len(),
        format = u16::from(format),
        "wrote GIM texture"
    );
    Ok(EncodedTexture {
        texture,
        palette: None,
    })
}

/// Packs each row of `values` separately so 4-bit rows start on a byte boundary.
fn encode_rows<T>(
    values: &[T],
    width: usize,
    mut encode: impl FnMut(&[T]) -> TextureResult<Vec<u8>>,
) -> TextureResult<Vec<u8>> {
    let mut out = Vec::new();
    for row in values.chunks_exact(width) {
        out.extend(encode(row)?);
    }
    Ok(out)
}

/// Palette block body holding `entries` entries, unused ones transparent.
fn palette_block(
    palette: &Palette,
    format: GimPaletteFormat,
    entries: usize,
) -> TextureResult<Vec<u8>> {
    let data = palette.encode_padded(entries, Endian::Little)?;
    let block = GimBlock {
        format_code: format.into(),
        pixel_order: 0,
        width: entries as u16,
        height: 1,
        bits_per_pixel: format.bits_per_pixel(),
        payload: 0..data.len(),
    };
    let mut body = Vec::with_capacity(BLOCK_HEADER_SIZE + data.len());
    block.write(&data, &mut body);
    Ok(body)
}
