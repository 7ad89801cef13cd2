//! Container-agnostic entry points.

use crate::handlers::handler;
use crate::sniff::sniff_magic;
use ctex_common::{
    ContainerKind, EncodedTexture, FormatMismatch, PaletteSupply, RgbaImage, Texture,
    TextureInfo, TextureResult,
};
use ctex_gim::{encode_gim, likely_gim, GimEncodeSettings};
use ctex_gvr::{encode_gvr, likely_gvp, likely_gvr, read_gvp, GvrEncodeSettings};
use ctex_pvr::{encode_pvr, likely_pvp, likely_pvr, read_pvp, PvrEncodeSettings};

/// Container and settings to encode with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeTarget {
    /// GVR texture, with a GVP file when the palette is external.
    Gvr(GvrEncodeSettings),
    /// PVR texture, with a PVP file for indexed formats.
    Pvr(PvrEncodeSettings),
    /// GIM texture.
    Gim(GimEncodeSettings),
}

impl EncodeTarget {
    /// Container family written.
    pub fn container(&self) -> ContainerKind {
        match self {
            EncodeTarget::Gvr(_) => ContainerKind::Gvr,
            EncodeTarget::Pvr(_) => ContainerKind::Pvr,
            EncodeTarget::Gim(_) => ContainerKind::Gim,
        }
    }
}

impl From<GvrEncodeSettings> for EncodeTarget {
    fn from(settings: GvrEncodeSettings) -> Self {
        EncodeTarget::Gvr(settings)
    }
}

impl From<PvrEncodeSettings> for EncodeTarget {
    fn from(settings: PvrEncodeSettings) -> Self {
        EncodeTarget::Pvr(settings)
    }
}

impl From<GimEncodeSettings> for EncodeTarget {
    fn from(settings: GimEncodeSettings) -> Self {
        EncodeTarget::Gim(settings)
    }
}

/// Identifies the container family of `buffer`.
///
/// Only magic codes and declared lengths are checked, so a truncated texture is not
/// recognized. Returns `None` for anything else.
pub fn probe(buffer: &[u8]) -> Option<ContainerKind> {
    if likely_gim(buffer) {
        Some(ContainerKind::Gim)
    } else if likely_gvr(buffer) {
        Some(ContainerKind::Gvr)
    } else if likely_pvr(buffer) {
        Some(ContainerKind::Pvr)
    } else {
        None
    }
}

/// Picks the family of `buffer`, falling back to its magic alone so malformed headers
/// report their own error.
fn container_of(buffer: &[u8]) -> TextureResult<ContainerKind> {
    match probe(buffer).or_else(|| sniff_magic(buffer)) {
        Some(kind) => Ok(kind),
        None => {
            tracing::debug!(len = buffer.len(), "no known texture magic");
            Err(FormatMismatch::BadMagic.into())
        }
    }
}

/// Parses the header of any supported texture.
///
/// No palette is needed and no pixels are decoded, so textures with unknown format
/// codes or external palettes are still described.
///
/// # Errors
///
/// - [`TextureError::InvalidFormat`] for unknown magic codes, inconsistent lengths or
///   truncated headers.
/// - [`TextureError::CorruptChunk`] for malformed GIM chunk streams.
///
/// [`TextureError::InvalidFormat`]: ctex_common::TextureError::InvalidFormat
/// [`TextureError::CorruptChunk`]: ctex_common::TextureError::CorruptChunk
pub fn read_info(buffer: &[u8]) -> TextureResult<TextureInfo> {
    handler(container_of(buffer)?).read_info(buffer)
}

/// Decodes any supported texture.
///
/// `supply` provides the palette of indexed textures that do not embed one.
///
/// # Errors
///
/// Everything [`read_info`] raises, plus [`TextureError::UnsupportedCodec`] for format
/// codes without a codec and [`TextureError::MissingPalette`] when a required palette
/// was not supplied.
///
/// [`TextureError::UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
/// [`TextureError::MissingPalette`]: ctex_common::TextureError::MissingPalette
pub fn decode(buffer: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
    let kind = container_of(buffer)?;
    tracing::debug!(?kind, len = buffer.len(), "decoding texture");
    handler(kind).decode(buffer, supply)
}

/// Decodes a texture whose palette lives in a GVP or PVP file.
///
/// The palette file is recognized by its own magic, independently of the texture.
///
/// # Errors
///
/// Everything [`decode`] raises, plus the errors of reading the palette file.
/// A palette file that is neither GVP nor PVP is [`FormatMismatch::BadMagic`].
pub fn decode_with_palette_file(buffer: &[u8], palette_bytes: &[u8]) -> TextureResult<Texture> {
    let palette = if likely_gvp(palette_bytes) {
        read_gvp(palette_bytes)?
    } else if likely_pvp(palette_bytes) {
        read_pvp(palette_bytes)?
    } else {
        return Err(FormatMismatch::BadMagic.into());
    };
    decode(buffer, &PaletteSupply::External(palette))
}

/// Encodes `image` into the container selected by `target`.
///
/// # Errors
///
/// The errors of [`encode_gvr`], [`encode_pvr`] or [`encode_gim`].
pub fn encode(image: &RgbaImage, target: &EncodeTarget) -> TextureResult<EncodedTexture> {
    tracing::debug!(
        container = ?target.container(),
        width = image.width(),
        height = image.height(),
        "encoding texture"
    );
    match target {
        EncodeTarget::Gvr(settings) => encode_gvr(image, settings),
        EncodeTarget::Pvr(settings) => encode_pvr(image, settings),
        EncodeTarget::Gim(settings) => encode_gim(image, settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctex_common::{Color8888, TextureError};
    use ctex_gim::GimEncodeSettingsBuilder;
    use ctex_gvr::{GvrDataFormat, GvrEncodeSettingsBuilder};

    fn red(width: u32, height: u32) -> RgbaImage {
        RgbaImage::filled(width, height, Color8888::new(255, 0, 0, 255)).unwrap()
    }

    #[test]
    fn probe_identifies_encoded_textures() {
        let gvr = encode(
            &red(8, 8),
            &GvrEncodeSettingsBuilder::new()
                .data_format(GvrDataFormat::Rgb565)
                .build()
                .into(),
        )
        .unwrap();
        let gim = encode(&red(8, 8), &GimEncodeSettingsBuilder::new().build().into()).unwrap();
        assert_eq!(probe(&gvr.texture), Some(ContainerKind::Gvr));
        assert_eq!(probe(&gim.texture), Some(ContainerKind::Gim));
    }

    #[test]
    fn unknown_magic_is_bad_magic() {
        assert_eq!(probe(b"DDS |....|....|...."), None);
        assert_eq!(
            read_info(b"DDS |....|....|...."),
            Err(TextureError::InvalidFormat(FormatMismatch::BadMagic))
        );
    }

    #[test]
    fn unknown_palette_file_is_bad_magic() {
        let gvr = encode(
            &red(8, 8),
            &GvrEncodeSettingsBuilder::new()
                .data_format(GvrDataFormat::Rgb565)
                .build()
                .into(),
        )
        .unwrap();
        assert_eq!(
            decode_with_palette_file(&gvr.texture, b"not a palette file"),
            Err(TextureError::InvalidFormat(FormatMismatch::BadMagic))
        );
    }

    #[test]
    fn encode_target_reports_its_container() {
        let target: EncodeTarget = GimEncodeSettingsBuilder::new().build().into();
        assert_eq!(target.container(), ContainerKind::Gim);
    }
}
