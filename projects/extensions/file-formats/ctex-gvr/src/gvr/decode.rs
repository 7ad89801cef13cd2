use super::constants::{ARGB8888_TILE_BYTES, DXT1_TILE_BYTES, SHAPE};
use super::formats::{GvrDataFlags, GvrDataFormat};
use super::parse_gvr::parse_gvr;
use alloc::vec::Vec;
use ctex_common::block::{decode_dxt1_block, scatter_block, BlockByteOrder};
use ctex_common::error::require_len;
use ctex_common::layout::tile::TileSwizzle;
use ctex_common::mipmap::level_dimensions;
use ctex_common::{
    Color8888, Endian, Palette, PaletteSource, PaletteSupply, RgbaImage, Texture, TextureResult,
};

/// Decodes a GVR texture.
///
/// Indexed textures read their palette from the container when it carries one, and from
/// `supply` otherwise.
///
/// # Errors
///
/// - Header errors from [`parse_gvr`].
/// - [`TextureError::UnsupportedCodec`] for an unknown data or palette format.
/// - [`TextureError::InvalidDimensions`] unless both sides are powers of two in `8..=1024`.
/// - [`TextureError::MissingPalette`] if an external palette is needed and `supply` has none.
/// - [`TextureError::PaletteIndexOutOfRange`] if the supplied palette is too short.
///
/// [`TextureError::UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
/// [`TextureError::MissingPalette`]: ctex_common::TextureError::MissingPalette
/// [`TextureError::PaletteIndexOutOfRange`]: ctex_common::TextureError::PaletteIndexOutOfRange
pub fn decode_gvr(data: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
    let header = parse_gvr(data)?;
    let info = header.info();
    let format = header.data_format()?;
    SHAPE.validate(info.width, info.height)?;
    let body = &data[header.data_offset()..header.data_end()];
    if data.len() > header.data_end() {
        tracing::warn!(
            trailing = data.len() - header.data_end(),
            "ignoring bytes after GVR texture data"
        );
    }

    let mut cursor = 0;
    let palette = if format.is_indexed() {
        let palette_format = info.require_palette_format()?;
        let entries = format.pixel_format().palette_entries();
        let palette = if info.has_embedded_palette {
            if header.flags.contains(GvrDataFlags::EXTERNAL_PALETTE) {
                tracing::warn!("both palette flags set, using the internal palette");
            }
            cursor = entries * 2;
            Palette::decode(body, entries, palette_format, Endian::Big, PaletteSource::Embedded)?
        } else {
            supply.resolve(entries, palette_format)?
        };
        palette.check_capacity(format.pixel_format())?;
        Some(palette)
    } else {
        None
    };

    let entries = palette.as_ref().map(Palette::entries);
    let image = decode_surface(format, remaining(body, cursor), info.width, info.height, entries)?;
    cursor += format.surface_len(info.width, info.height);

    let mut mipmaps = Vec::new();
    if info.has_mipmaps && !format.is_indexed() {
        for (width, height) in level_dimensions(info.width, info.height) {
            mipmaps.push(decode_surface(format, remaining(body, cursor), width, height, None)?);
            cursor += format.surface_len(width, height);
        }
    }

    Texture::new(info, image, mipmaps, palette)
}

#[inline]
fn remaining(body: &[u8], cursor: usize) -> &[u8] {
    body.get(cursor..).unwrap_or_default()
}

/// Decodes one tiled surface of `format`.
pub(crate) fn decode_surface(
    format: GvrDataFormat,
    data: &[u8],
    width: u32,
    height: u32,
    palette: Option<&[Color8888]>,
) -> TextureResult<RgbaImage> {
    require_len(data, format.surface_len(width, height))?;
    let (tile_width, tile_height) = format.tile();
    let swizzle = TileSwizzle::new(width, height, tile_width, tile_height)?;

    let stored = match format {
        GvrDataFormat::Argb8888 => decode_argb8888_tiles(data, swizzle.stored_len()),
        GvrDataFormat::Dxt1 => return decode_dxt1_tiles(data, width, height),
        _ => format.pixel_format().codec().decode_pixels(
            data,
            swizzle.stored_len(),
            Endian::Big,
            palette,
        )?,
    };
    RgbaImage::new(width, height, swizzle.unswizzle(&stored)?)
}

/// Each 64-byte tile holds 16 `A, R` pairs followed by 16 `G, B` pairs.
fn decode_argb8888_tiles(data: &[u8], count: usize) -> Vec<Color8888> {
    let mut pixels = Vec::with_capacity(count);
    for tile in data.chunks_exact(ARGB8888_TILE_BYTES).take(count / 16) {
        let (ar, gb) = tile.split_at(ARGB8888_TILE_BYTES / 2);
        for (ar, gb) in ar.chunks_exact(2).zip(gb.chunks_exact(2)) {
            pixels.push(Color8888::new(ar[1], gb[0], gb[1], ar[0]));
        }
    }
    pixels
}

/// Each 32-byte tile covers 8x8 pixels as four 4x4 blocks: top-left, top-right,
/// bottom-left, bottom-right.
fn decode_dxt1_tiles(data: &[u8], width: u32, height: u32) -> TextureResult<RgbaImage> {
    let mut pixels = alloc::vec![Color8888::TRANSPARENT; width as usize * height as usize];
    let tiles_x = width.div_ceil(8);
    let tiles = data
        .chunks_exact(DXT1_TILE_BYTES)
        .take((tiles_x * height.div_ceil(8)) as usize);
    for (index, tile) in tiles.enumerate() {
        let tile_x = (index as u32 % tiles_x) * 8;
        let tile_y = (index as u32 / tiles_x) * 8;
        for (sub, block) in tile.chunks_exact(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(block);
            let decoded = decode_dxt1_block(&bytes, BlockByteOrder::GameCube);
            let x = tile_x + (sub as u32 % 2) * 4;
            let y = tile_y + (sub as u32 / 2) * 4;
            scatter_block(&mut pixels, width, height, x, y, &decoded);
        }
    }
    RgbaImage::new(width, height, pixels)
}
