use super::constants::*;
use super::formats::PvrDataFormat;
use super::parse_pvr::PvrHeader;
use crate::pvp::write_pvp;
use crate::settings::PvrEncodeSettings;
use alloc::vec::Vec;
use ctex_common::layout::twiddle::Twiddler;
use ctex_common::layout::vq::{self, VqBlock};
use ctex_common::layout::DataLayout;
use ctex_common::mipmap::build_chain;
use ctex_common::{
    Color8888, EncodedTexture, Endian, Palette, PaletteSource, PixelCodec, RgbaImage, TextureResult,
};
use ctex_quantize::{quantize, quantize_blocks, QuantizeSettingsBuilder};

/// Encodes `image` as a PVR texture.
///
/// Indexed data formats quantize the image and return the palette as a PVP file; the
/// pixel format then names the palette's entry format. Vector-quantized formats train a
/// codebook over the base image and its mipmap levels.
///
/// # Errors
///
/// - Setting errors from [`PvrEncodeSettings::validate`].
/// - [`TextureError::InvalidDimensions`] if the image does not fit the data format.
///
/// [`TextureError::InvalidDimensions`]: ctex_common::TextureError::InvalidDimensions
pub fn encode_pvr(image: &RgbaImage, settings: &PvrEncodeSettings) -> TextureResult<EncodedTexture> {
    settings.validate()?;
    let data_format = settings.effective_data_format()?;
    data_format
        .shape()
        .validate(image.width(), image.height())?;

    let pixel_format = settings.pixel_format.require_pixel_format()?;
    let codec = pixel_format.codec();
    let mut palette_file = None;
    let body = if let Some(index_format) = data_format.index_format() {
        let quantized = quantize(
            image,
            &QuantizeSettingsBuilder::new()
                .max_colors(index_format.palette_entries() as u16)
                .dither(settings.options.dither)
                .build(),
        )?;
        let palette = Palette::new(quantized.palette, pixel_format, PaletteSource::External)?;
        palette_file = Some(write_pvp(&palette)?);

        let stored = Twiddler::rectangle(image.width(), image.height())?.twiddle(&quantized.indices)?;
        index_format.codec().encode_indices(&stored, Endian::Little)?
    } else if data_format.is_vq() {
        encode_vq(data_format, codec, image)?
    } else {
        let mut body = Vec::new();
        if data_format.has_mipmaps() {
            body.resize(data_format.mipmap_padding(codec.bits_per_pixel()), 0);
            let chain = build_chain(image)?;
            tracing::debug!(levels = chain.len(), "writing PVR mipmap chain");
            for level in chain.iter().rev() {
                body.extend(encode_surface(data_format, codec, level)?);
            }
        }
        body.extend(encode_surface(data_format, codec, image)?);
        body
    };

    let global_index = settings.options.global_index;
    let header = PvrHeader {
        global_index,
        texture_offset: match global_index {
            Some(_) => GLOBAL_INDEX_PREFIX_SIZE + GLOBAL_INDEX_LENGTH as usize,
            None => 0,
        },
        declared_length: (body.len() + PVRT_LENGTH_BIAS) as u32,
        pixel_format_code: settings.pixel_format.into(),
        data_format_code: data_format.into(),
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

/// Encodes one twiddled or linear surface.
pub(crate) fn encode_surface(
    data_format: PvrDataFormat,
    codec: &PixelCodec,
    image: &RgbaImage,
) -> TextureResult<Vec<u8>> {
    match data_format.layout() {
        DataLayout::Linear => codec.encode_pixels(image.pixels(), Endian::Little),
        _ => {
            let stored = Twiddler::rectangle(image.width(), image.height())?.twiddle(image.pixels())?;
            codec.encode_pixels(&stored, Endian::Little)
        }
    }
}

/// Writes the codebook, the padding byte and the indices of every level, smallest first.
fn encode_vq(
    data_format: PvrDataFormat,
    codec: &PixelCodec,
    image: &RgbaImage,
) -> TextureResult<Vec<u8>> {
    let mut levels = Vec::new();
    if data_format.has_mipmaps() {
        levels = build_chain(image)?;
        levels.reverse();
    }
    levels.push(image.clone());

    let mut blocks: Vec<VqBlock> = Vec::new();
    for level in &levels {
        blocks.extend(vq::split_blocks(level)?);
    }
    let entries = data_format.codebook_entries(image.width());
    let quantized = quantize_blocks(&blocks, entries)?;
    tracing::debug!(
        blocks = blocks.len(),
        used = quantized.codebook.len(),
        entries,
        "trained VQ codebook"
    );

    let mut codebook = quantized.codebook;
    codebook.resize(entries, [Color8888::TRANSPARENT; 4]);
    let pixels: Vec<Color8888> = codebook.iter().flatten().copied().collect();
    let mut body = codec.encode_pixels(&pixels, Endian::Little)?;
    body.resize(body.len() + data_format.mipmap_padding(codec.bits_per_pixel()), 0);

    let mut indices = quantized.indices.as_slice();
    for level in &levels {
        let (level_indices, rest) = indices.split_at(vq::index_count(level.width(), level.height()));
        body.extend(vq::store_indices(level_indices, level.width(), level.height())?);
        indices = rest;
    }
    Ok(body)
}
