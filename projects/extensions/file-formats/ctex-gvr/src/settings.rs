//! Encoder settings.

use crate::gvr::{GvrDataFormat, GvrPaletteFormat};
use ctex_common::{CodecKind, EncodeOptions, TextureError, TextureResult};

/// How [`encode_gvr`] writes a texture.
///
/// [`encode_gvr`]: crate::encode_gvr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GvrEncodeSettings {
    /// Pixel data format.
    pub data_format: GvrDataFormat,
    /// Palette entry format; used by indexed data formats only.
    pub palette_format: GvrPaletteFormat,
    /// Options shared with the other containers.
    pub options: EncodeOptions,
}

impl GvrEncodeSettings {
    /// Rejects combinations the container cannot store.
    ///
    /// # Errors
    ///
    /// - [`TextureError::UnsupportedCodec`] for decode-only data formats.
    /// - [`TextureError::InvalidSettings`] for mipmaps on an indexed format, or an external
    ///   palette on a direct-color one.
    pub fn validate(&self) -> TextureResult<()> {
        if !self.data_format.can_encode() {
            return Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Data,
                code: self.data_format as u16,
            });
        }
        if self.data_format.is_indexed() && self.options.mipmaps {
            return Err(TextureError::InvalidSettings(
                "indexed GVR textures cannot carry mipmaps",
            ));
        }
        if !self.data_format.is_indexed() && self.options.external_palette {
            return Err(TextureError::InvalidSettings(
                "external palette requested for a direct-color format",
            ));
        }
        Ok(())
    }
}

/// Builder for [`GvrEncodeSettings`].
#[derive(Debug, Default)]
pub struct GvrEncodeSettingsBuilder {
    data_format: Option<GvrDataFormat>,
    palette_format: Option<GvrPaletteFormat>,
    options: Option<EncodeOptions>,
}

impl GvrEncodeSettingsBuilder {
    /// Create a new builder with all settings unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel data format.
    pub fn data_format(mut self, data_format: GvrDataFormat) -> Self {
        self.data_format = Some(data_format);
        self
    }

    /// Set the palette entry format.
    pub fn palette_format(mut self, palette_format: GvrPaletteFormat) -> Self {
        self.palette_format = Some(palette_format);
        self
    }

    /// Set the shared encode options.
    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Build the settings, using defaults for unset fields.
    pub fn build(self) -> GvrEncodeSettings {
        let default = GvrEncodeSettings::default();
        GvrEncodeSettings {
            data_format: self.data_format.unwrap_or(default.data_format),
            palette_format: self.palette_format.unwrap_or(default.palette_format),
            options: self.options.unwrap_or(default.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use ctex_common::EncodeOptionsBuilder;

    #[test]
    fn builder_defaults_match_default() {
        assert_eq!(GvrEncodeSettingsBuilder::new().build(), GvrEncodeSettings::default());
    }

    #[rstest]
    #[case(GvrDataFormat::Rgb565, false, false, true)]
    #[case(GvrDataFormat::Rgb565, true, false, true)]
    #[case(GvrDataFormat::Index4, false, true, true)]
    #[case(GvrDataFormat::Index8, true, false, false)]
    #[case(GvrDataFormat::Argb8888, false, true, false)]
    #[case(GvrDataFormat::Dxt1, false, false, false)]
    fn validate_rejects_contradictions(
        #[case] data_format: GvrDataFormat,
        #[case] mipmaps: bool,
        #[case] external_palette: bool,
        #[case] ok: bool,
    ) {
        let settings = GvrEncodeSettingsBuilder::new()
            .data_format(data_format)
            .options(
                EncodeOptionsBuilder::new()
                    .mipmaps(mipmaps)
                    .external_palette(external_palette)
                    .build(),
            )
            .build();
        assert_eq!(settings.validate().is_ok(), ok);
    }
}
