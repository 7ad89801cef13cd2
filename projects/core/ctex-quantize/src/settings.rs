//! Quantizer settings.

use ctex_common::texture::DitherMode;
use ctex_common::{TextureError, TextureResult};

/// Largest palette the quantizer produces.
pub const MAX_COLORS: u16 = 256;

/// Settings for [`quantize`](crate::quantize).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeSettings {
    /// Maximum number of palette colors, `1..=256`.
    pub max_colors: u16,
    /// Error diffusion used when the palette is reduced.
    pub dither: DitherMode,
}

impl Default for QuantizeSettings {
    fn default() -> Self {
        Self {
            max_colors: MAX_COLORS,
            dither: DitherMode::None,
        }
    }
}

impl QuantizeSettings {
    /// Checks that `max_colors` is within `1..=256`.
    pub fn validate(&self) -> TextureResult<()> {
        if self.max_colors == 0 || self.max_colors > MAX_COLORS {
            return Err(TextureError::dimensions(
                self.max_colors as u32,
                1,
                "palette size must be between 1 and 256",
            ));
        }
        Ok(())
    }
}

/// Builder for [`QuantizeSettings`].
#[derive(Debug, Default)]
pub struct QuantizeSettingsBuilder {
    max_colors: Option<u16>,
    dither: Option<DitherMode>,
}

impl QuantizeSettingsBuilder {
    /// Create a new builder with all options unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of palette colors.
    pub fn max_colors(mut self, max_colors: u16) -> Self {
        self.max_colors = Some(max_colors);
        self
    }

    /// Set the dithering mode.
    pub fn dither(mut self, dither: DitherMode) -> Self {
        self.dither = Some(dither);
        self
    }

    /// Build the settings, using defaults for unset fields.
    pub fn build(self) -> QuantizeSettings {
        let default = QuantizeSettings::default();
        QuantizeSettings {
            max_colors: self.max_colors.unwrap_or(default.max_colors),
            dither: self.dither.unwrap_or(default.dither),
        }
    }
}
