//! Encoder settings.

use crate::gim::metadata::validate_metadata;
use crate::gim::{GimPaletteFormat, GimPixelFormat};
use ctex_common::{EncodeOptions, TextureError, TextureMetadata, TextureResult};

/// How [`encode_gim`] writes a texture.
///
/// [`encode_gim`]: crate::encode_gim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GimEncodeSettings {
    /// Pixel format of the image block.
    pub pixel_format: GimPixelFormat,
    /// Entry format of the palette block, for indexed pixel formats.
    pub palette_format: GimPaletteFormat,
    /// Free-text metadata; no metadata chunk is written when `None`.
    pub metadata: Option<TextureMetadata>,
    /// Options shared with the other containers.
    pub options: EncodeOptions,
}

impl GimEncodeSettings {
    /// Rejects combinations the container cannot store.
    ///
    /// # Errors
    ///
    /// - [`TextureError::UnsupportedCodec`] for 16 and 32-bit indices.
    /// - [`TextureError::InvalidSettings`] for mipmaps, an external palette, a global
    ///   index or metadata strings containing NUL.
    pub fn validate(&self) -> TextureResult<()> {
        if self.pixel_format.dxt_variant().is_none() {
            self.pixel_format.require_pixel_format()?;
        }
        let options = &self.options;
        if options.mipmaps {
            return Err(TextureError::InvalidSettings(
                "GIM textures are written without mipmaps",
            ));
        }
        if options.external_palette {
            return Err(TextureError::InvalidSettings(
                "GIM palettes are always embedded",
            ));
        }
        if options.global_index.is_some() {
            return Err(TextureError::InvalidSettings(
                "GIM textures have no global index header",
            ));
        }
        if let Some(metadata) = &self.metadata {
            validate_metadata(metadata)?;
        }
        Ok(())
    }
}

/// Builder for [`GimEncodeSettings`].
#[derive(Debug, Default)]
pub struct GimEncodeSettingsBuilder {
    pixel_format: Option<GimPixelFormat>,
    palette_format: Option<GimPaletteFormat>,
    metadata: Option<TextureMetadata>,
    options: Option<EncodeOptions>,
}

impl GimEncodeSettingsBuilder {
    /// Create a new builder with all settings unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel format.
    pub fn pixel_format(mut self, pixel_format: GimPixelFormat) -> Self {
        self.pixel_format = Some(pixel_format);
        self
    }

    /// Set the palette entry format.
    pub fn palette_format(mut self, palette_format: GimPaletteFormat) -> Self {
        self.palette_format = Some(palette_format);
        self
    }

    /// Set the metadata strings.
    pub fn metadata(mut self, metadata: TextureMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set the shared encode options.
    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Build the settings, using defaults for unset fields.
    pub fn build(self) -> GimEncodeSettings {
        let default = GimEncodeSettings::default();
        GimEncodeSettings {
            pixel_format: self.pixel_format.unwrap_or(default.pixel_format),
            palette_format: self.palette_format.unwrap_or(default.palette_format),
            metadata: self.metadata,
            options: self.options.unwrap_or(default.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use ctex_common::{CodecKind, EncodeOptionsBuilder, GlobalIndex};

    #[test]
    fn defaults_are_abgr8888() {
        let settings = GimEncodeSettingsBuilder::new().build();
        assert_eq!(settings.pixel_format, GimPixelFormat::Abgr8888);
        assert_eq!(settings.palette_format, GimPaletteFormat::Abgr8888);
        assert!(settings.metadata.is_none());
        assert!(settings.validate().is_ok());
    }

    #[rstest]
    #[case(GimPixelFormat::Index16)]
    #[case(GimPixelFormat::Index32)]
    fn wide_indices_cannot_be_encoded(#[case] pixel_format: GimPixelFormat) {
        let settings = GimEncodeSettingsBuilder::new()
            .pixel_format(pixel_format)
            .build();
        assert!(matches!(
            settings.validate(),
            Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                ..
            })
        ));
    }

    #[rstest]
    #[case(EncodeOptionsBuilder::new().external_palette(true).build())]
    #[case(EncodeOptionsBuilder::new().global_index(GlobalIndex::gbix(1)).build())]
    fn container_features_gim_lacks_are_rejected(#[case] options: EncodeOptions) {
        let settings = GimEncodeSettingsBuilder::new()
            .pixel_format(GimPixelFormat::Index8)
            .options(options)
            .build();
        assert!(matches!(
            settings.validate(),
            Err(TextureError::InvalidSettings(_))
        ));
    }

    #[test]
    fn dxt_formats_validate() {
        let settings = GimEncodeSettingsBuilder::new()
            .pixel_format(GimPixelFormat::Dxt5)
            .build();
        assert!(settings.validate().is_ok());
    }
}
