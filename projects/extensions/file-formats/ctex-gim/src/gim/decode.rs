use super::constants::{HEIGHT_ALIGN, PITCH_ALIGN};
use super::formats::GimPaletteFormat;
use super::parse_gim::{parse_gim, GimBlock};
use alloc::vec::Vec;
use ctex_common::block;
use ctex_common::error::require_len;
use ctex_common::layout::tile::TileSwizzle;
use ctex_common::pixel::stream_len;
use ctex_common::{
    Color8888, Endian, Palette, PaletteSource, PaletteSupply, PixelCodec, PixelFormat, RgbaImage,
    Texture, TextureError, TextureResult,
};

/// Decodes a GIM texture.
///
/// Indexed textures use their embedded palette; `supply` is consulted only when the
/// palette chunk is missing.
///
/// # Errors
///
/// - Structural errors from [`parse_gim`].
/// - [`TextureError::UnsupportedCodec`] for unknown formats and 16/32-bit indices.
/// - [`TextureError::MissingPalette`] for an indexed texture with neither a palette
///   chunk nor a supplied palette.
/// - [`TextureError::PaletteOverflow`] if the palette has more entries than the index
///   format addresses.
pub fn decode_gim(data: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
    let header = parse_gim(data)?;
    let info = header.info();
    let format = header.pixel_format()?;
    let (width, height) = (info.width, info.height);
    let payload = header.image.payload(data);

    if let Some(variant) = format.dxt_variant() {
        let image = block::decode_image(variant, payload, width, height)?;
        return Texture::new(info, image, Vec::new(), None);
    }

    let pixel_format = format.require_pixel_format()?;
    let palette = if pixel_format.is_indexed() {
        let palette = match &header.palette {
            Some(block) => read_palette(data, block)?,
            None => supply.resolve(pixel_format.palette_entries(), PixelFormat::Abgr8888)?,
        };
        palette.check_capacity(pixel_format)?;
        Some(palette)
    } else {
        None
    };

    let image = decode_surface(
        pixel_format.codec(),
        payload,
        width,
        height,
        header.image.is_swizzled(),
        palette.as_ref().map(Palette::entries),
    )?;
    Texture::new(info, image, Vec::new(), palette)
}

fn read_palette(data: &[u8], block: &GimBlock) -> TextureResult<Palette> {
    let format = GimPaletteFormat::try_from(block.format_code)?;
    Palette::decode(
        block.payload(data),
        block.width as usize,
        format.pixel_format(),
        Endian::Little,
        PaletteSource::Embedded,
    )
}

/// Decodes a payload of rows padded to 16 bytes and, if `swizzled`, stored in
/// 16-byte by 8-row tiles.
pub(crate) fn decode_surface(
    codec: &PixelCodec,
    payload: &[u8],
    width: u32,
    height: u32,
    swizzled: bool,
    palette: Option<&[Color8888]>,
) -> TextureResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(TextureError::dimensions(width, height, "image dimensions must be positive"));
    }
    let row_bytes = stream_len(codec.bits_per_pixel(), width as usize);
    let rows = if swizzled {
        let swizzle = TileSwizzle::new(row_bytes as u32, height, PITCH_ALIGN, HEIGHT_ALIGN)?;
        require_len(payload, swizzle.stored_len())?;
        swizzle.unswizzle(&payload[..swizzle.stored_len()])?
    } else {
        let pitch = row_bytes.next_multiple_of(PITCH_ALIGN as usize);
        require_len(payload, pitch * (height as usize - 1) + row_bytes)?;
        (0..height as usize)
            .flat_map(|y| &payload[y * pitch..y * pitch + row_bytes])
            .copied()
            .collect()
    };

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in rows.chunks_exact(row_bytes) {
        pixels.extend(codec.decode_pixels(row, width as usize, Endian::Little, palette)?);
    }
    RgbaImage::new(width, height, pixels)
}
