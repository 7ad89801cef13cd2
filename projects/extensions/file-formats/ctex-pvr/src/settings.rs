//! Encoder settings.

use crate::pvr::{PvrDataFormat, PvrPixelFormat};
use ctex_common::{EncodeOptions, TextureError, TextureResult};

/// How [`encode_pvr`] writes a texture.
///
/// For indexed data formats [`pixel_format`] is the format of the external palette's
/// entries. Setting [`EncodeOptions::mipmaps`] selects the mipmap variant of the data
/// format.
///
/// [`encode_pvr`]: crate::encode_pvr
/// [`pixel_format`]: PvrEncodeSettings::pixel_format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PvrEncodeSettings {
    /// Pixel format, or palette entry format for indexed data.
    pub pixel_format: PvrPixelFormat,
    /// Data format.
    pub data_format: PvrDataFormat,
    /// Options shared with the other containers.
    pub options: EncodeOptions,
}

impl PvrEncodeSettings {
    /// The data format actually written, after applying [`EncodeOptions::mipmaps`].
    ///
    /// # Errors
    ///
    /// [`TextureError::InvalidSettings`] if mipmaps are requested for a data format
    /// without a mipmap variant.
    pub fn effective_data_format(&self) -> TextureResult<PvrDataFormat> {
        if !self.options.mipmaps {
            return Ok(self.data_format);
        }
        self.data_format
            .with_mipmaps()
            .ok_or(TextureError::InvalidSettings(
                "PVR data format has no mipmap variant",
            ))
    }

    /// Rejects combinations the container cannot store.
    ///
    /// # Errors
    ///
    /// - [`TextureError::UnsupportedCodec`] for pixel formats without a codec.
    /// - [`TextureError::InvalidSettings`] for VQ with a pixel format other than 16-bit,
    ///   an external palette on direct-color data, or mipmaps without a mipmap variant.
    pub fn validate(&self) -> TextureResult<()> {
        let pixel_format = self.pixel_format.require_pixel_format()?;
        let data_format = self.effective_data_format()?;
        if data_format.is_vq() && pixel_format.bits_per_pixel() != 16 {
            return Err(TextureError::InvalidSettings(
                "vector quantization needs a 16-bit pixel format",
            ));
        }
        if data_format.index_format().is_none() && self.options.external_palette {
            return Err(TextureError::InvalidSettings(
                "external palette requested for a direct-color format",
            ));
        }
        Ok(())
    }
}

/// Builder for [`PvrEncodeSettings`].
#[derive(Debug, Default)]
pub struct PvrEncodeSettingsBuilder {
    pixel_format: Option<PvrPixelFormat>,
    data_format: Option<PvrDataFormat>,
    options: Option<EncodeOptions>,
}

impl PvrEncodeSettingsBuilder {
    /// Create a new builder with all settings unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel format.
    pub fn pixel_format(mut self, pixel_format: PvrPixelFormat) -> Self {
        self.pixel_format = Some(pixel_format);
        self
    }

    /// Set the data format.
    pub fn data_format(mut self, data_format: PvrDataFormat) -> Self {
        self.data_format = Some(data_format);
        self
    }

    /// Set the shared encode options.
    pub fn options(mut self, options: EncodeOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Build the settings, using defaults for unset fields.
    pub fn build(self) -> PvrEncodeSettings {
        let default = PvrEncodeSettings::default();
        PvrEncodeSettings {
            pixel_format: self.pixel_format.unwrap_or(default.pixel_format),
            data_format: self.data_format.unwrap_or(default.data_format),
            options: self.options.unwrap_or(default.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use ctex_common::EncodeOptionsBuilder;

    fn settings(
        pixel_format: PvrPixelFormat,
        data_format: PvrDataFormat,
        mipmaps: bool,
        external_palette: bool,
    ) -> PvrEncodeSettings {
        PvrEncodeSettingsBuilder::new()
            .pixel_format(pixel_format)
            .data_format(data_format)
            .options(
                EncodeOptionsBuilder::new()
                    .mipmaps(mipmaps)
                    .external_palette(external_palette)
                    .build(),
            )
            .build()
    }

    #[rstest]
    #[case(PvrPixelFormat::Rgb565, PvrDataFormat::SquareTwiddled, false, false, true)]
    #[case(PvrPixelFormat::Rgb565, PvrDataFormat::SquareTwiddled, true, false, true)]
    #[case(PvrPixelFormat::Argb8888, PvrDataFormat::Vq, false, false, false)]
    #[case(PvrPixelFormat::Yuv422, PvrDataFormat::SquareTwiddled, false, false, false)]
    #[case(PvrPixelFormat::Rgb565, PvrDataFormat::Rectangle, true, false, false)]
    #[case(PvrPixelFormat::Rgb565, PvrDataFormat::Rectangle, false, true, false)]
    #[case(PvrPixelFormat::Argb8888, PvrDataFormat::Index8, false, true, true)]
    fn validate_rejects_contradictions(
        #[case] pixel_format: PvrPixelFormat,
        #[case] data_format: PvrDataFormat,
        #[case] mipmaps: bool,
        #[case] external_palette: bool,
        #[case] ok: bool,
    ) {
        let settings = settings(pixel_format, data_format, mipmaps, external_palette);
        assert_eq!(settings.validate().is_ok(), ok);
    }

    #[test]
    fn mipmaps_select_variant() {
        let settings = settings(PvrPixelFormat::Rgb565, PvrDataFormat::SmallVq, true, false);
        assert_eq!(
            settings.effective_data_format(),
            Ok(PvrDataFormat::SmallVqMipmaps)
        );
    }
}
