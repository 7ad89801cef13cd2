//! Decode results, header metadata and encode options shared by every container.

use crate::error::{CodecKind, TextureError, TextureResult};
use crate::image::RgbaImage;
use crate::layout::DataLayout;
use crate::palette::{Palette, PaletteSource};
use crate::pixel::PixelFormat;
use alloc::string::String;
use alloc::vec::Vec;

/// Supported container families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// GameCube/Wii `GVRT` texture.
    Gvr,
    /// Dreamcast `PVRT` texture.
    Pvr,
    /// PSP `MIG.00.1PSP` chunked texture.
    Gim,
}

impl ContainerKind {
    /// Usual file extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            ContainerKind::Gvr => "gvr",
            ContainerKind::Pvr => "pvr",
            ContainerKind::Gim => "gim",
        }
    }
}

/// Magic of the optional header carrying a [`GlobalIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalIndexKind {
    /// `GBIX`.
    Gbix,
    /// `GCIX`.
    Gcix,
}

impl GlobalIndexKind {
    /// The four magic bytes.
    pub const fn magic(self) -> [u8; 4] {
        match self {
            GlobalIndexKind::Gbix => *b"GBIX",
            GlobalIndexKind::Gcix => *b"GCIX",
        }
    }

    /// Recognizes a global index header magic.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"GBIX" => Some(GlobalIndexKind::Gbix),
            b"GCIX" => Some(GlobalIndexKind::Gcix),
            _ => None,
        }
    }
}

/// Resource identifier carried ahead of a texture header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalIndex {
    /// The 32-bit tag.
    pub value: u32,
    /// Which header magic carries it.
    pub kind: GlobalIndexKind,
}

impl GlobalIndex {
    /// Creates a `GBIX` global index.
    pub const fn gbix(value: u32) -> Self {
        Self {
            value,
            kind: GlobalIndexKind::Gbix,
        }
    }

    /// Creates a `GCIX` global index.
    pub const fn gcix(value: u32) -> Self {
        Self {
            value,
            kind: GlobalIndexKind::Gcix,
        }
    }
}

/// Free-text metadata of a GIM texture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureMetadata {
    /// Name of the file the texture was converted from.
    pub original_filename: String,
    /// User who produced it.
    pub user: String,
    /// Timestamp as written by the producing tool.
    pub timestamp: String,
    /// Producing tool.
    pub tool: String,
}

/// Header information, readable without a palette and without decoding pixels.
///
/// Raw codes are always present. The resolved fields are `None` when a code has no
/// codec; decoding such a texture fails with [`TextureError::UnsupportedCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Container family.
    pub container: ContainerKind,
    /// Width of the base image.
    pub width: u32,
    /// Height of the base image.
    pub height: u32,
    /// Raw pixel format code.
    pub pixel_format_code: u16,
    /// Raw data format code.
    pub data_format_code: u16,
    /// Raw palette entry format code, for indexed textures.
    pub palette_format_code: Option<u16>,
    /// Resolved pixel format.
    pub pixel_format: Option<PixelFormat>,
    /// Resolved data layout.
    pub data_layout: Option<DataLayout>,
    /// Resolved palette entry format.
    pub palette_format: Option<PixelFormat>,
    /// Whether a mipmap chain follows the base image.
    pub has_mipmaps: bool,
    /// Whether the palette is stored in the container.
    pub has_embedded_palette: bool,
    /// Whether the palette must be supplied from a separate file.
    pub needs_external_palette: bool,
    /// Optional global index header.
    pub global_index: Option<GlobalIndex>,
    /// Free-text metadata, if the container carries it.
    pub metadata: Option<TextureMetadata>,
}

impl TextureInfo {
    /// Creates info for a `width` x `height` texture with nothing resolved yet.
    pub fn new(container: ContainerKind, width: u32, height: u32) -> Self {
        Self {
            container,
            width,
            height,
            pixel_format_code: 0,
            data_format_code: 0,
            palette_format_code: None,
            pixel_format: None,
            data_layout: None,
            palette_format: None,
            has_mipmaps: false,
            has_embedded_palette: false,
            needs_external_palette: false,
            global_index: None,
            metadata: None,
        }
    }

    /// The pixel format, or [`TextureError::UnsupportedCodec`] if it did not resolve.
    pub fn require_pixel_format(&self) -> TextureResult<PixelFormat> {
        self.pixel_format.ok_or(TextureError::UnsupportedCodec {
            kind: CodecKind::Pixel,
            code: self.pixel_format_code,
        })
    }

    /// The data layout, or [`TextureError::UnsupportedCodec`] if it did not resolve.
    pub fn require_data_layout(&self) -> TextureResult<DataLayout> {
        self.data_layout.ok_or(TextureError::UnsupportedCodec {
            kind: CodecKind::Data,
            code: self.data_format_code,
        })
    }

    /// The palette entry format, or [`TextureError::UnsupportedCodec`] if it did not resolve.
    pub fn require_palette_format(&self) -> TextureResult<PixelFormat> {
        self.palette_format.ok_or(TextureError::UnsupportedCodec {
            kind: CodecKind::Palette,
            code: self.palette_format_code.unwrap_or(0),
        })
    }

    /// Whether the resolved pixel format is palette-indexed.
    pub fn is_indexed(&self) -> bool {
        self.pixel_format.is_some_and(PixelFormat::is_indexed)
    }
}

/// A decoded texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Header information.
    pub info: TextureInfo,
    /// Base image.
    pub image: RgbaImage,
    /// Mipmap levels below the base image, largest first.
    pub mipmaps: Vec<RgbaImage>,
    /// Palette used by an indexed texture.
    pub palette: Option<Palette>,
}

impl Texture {
    /// Assembles a texture, enforcing that a palette is present exactly when the pixel
    /// format is indexed.
    pub fn new(
        info: TextureInfo,
        image: RgbaImage,
        mipmaps: Vec<RgbaImage>,
        palette: Option<Palette>,
    ) -> TextureResult<Self> {
        match (info.is_indexed(), &palette) {
            (true, None) => return Err(TextureError::MissingPalette),
            (false, Some(_)) => {
                return Err(TextureError::InvalidSettings(
                    "direct-color textures do not carry a palette",
                ))
            }
            _ => {}
        }
        Ok(Self {
            info,
            image,
            mipmaps,
            palette,
        })
    }
}

/// The palette a caller offers when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PaletteSupply {
    /// No palette; decoding a texture that needs an external one fails.
    #[default]
    None,
    /// A palette loaded from a separate palette file.
    External(Palette),
    /// Accept a generated grayscale ramp in place of a missing external palette.
    SyntheticGrayscale,
}

impl PaletteSupply {
    /// Produces the palette for a texture that needs an external one.
    ///
    /// `entries` and `format` size and tag a synthetic palette.
    ///
    /// # Errors
    ///
    /// [`TextureError::MissingPalette`] if nothing was supplied.
    pub fn resolve(&self, entries: usize, format: PixelFormat) -> TextureResult<Palette> {
        match self {
            PaletteSupply::None => Err(TextureError::MissingPalette),
            PaletteSupply::External(palette) => {
                Ok(palette.clone().with_source(PaletteSource::External))
            }
            PaletteSupply::SyntheticGrayscale => {
                tracing::warn!(entries, "no external palette, using a synthetic grayscale ramp");
                Palette::synthetic_grayscale(entries, format)
            }
        }
    }
}

/// The bytes produced by an encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedTexture {
    /// The texture container.
    pub texture: Vec<u8>,
    /// A separate palette file, when the palette is stored externally.
    pub palette: Option<Vec<u8>>,
}

/// Error diffusion applied while mapping pixels to a reduced palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DitherMode {
    /// Each pixel maps to its nearest palette color.
    #[default]
    None,
    /// Floyd-Steinberg error diffusion.
    FloydSteinberg,
}

/// Options shared by every container encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Dithering used when quantizing to a palette or codebook.
    pub dither: DitherMode,
    /// Generate and store a mipmap chain.
    pub mipmaps: bool,
    /// Global index header to prepend.
    pub global_index: Option<GlobalIndex>,
    /// Write the palette to a separate palette file instead of embedding it.
    pub external_palette: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            dither: DitherMode::None,
            mipmaps: false,
            global_index: None,
            external_palette: false,
        }
    }
}

/// Builder for [`EncodeOptions`].
///
/// # Examples
///
/// ```
/// use ctex_common::texture::{DitherMode, EncodeOptionsBuilder, GlobalIndex};
///
/// let options = EncodeOptionsBuilder::new()
///     .dither(DitherMode::FloydSteinberg)
///     .global_index(GlobalIndex::gbix(7))
///     .build();
/// assert!(!options.mipmaps);
/// ```
#[derive(Debug, Default)]
pub struct EncodeOptionsBuilder {
    dither: Option<DitherMode>,
    mipmaps: Option<bool>,
    global_index: Option<GlobalIndex>,
    external_palette: Option<bool>,
}

impl EncodeOptionsBuilder {
    /// Create a new builder with all options unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dithering mode.
    pub fn dither(mut self, dither: DitherMode) -> Self {
        self.dither = Some(dither);
        self
    }

    /// Set whether a mipmap chain is generated.
    pub fn mipmaps(mut self, mipmaps: bool) -> Self {
        self.mipmaps = Some(mipmaps);
        self
    }

    /// Set the global index header.
    pub fn global_index(mut self, global_index: GlobalIndex) -> Self {
        self.global_index = Some(global_index);
        self
    }

    /// Set whether the palette goes to a separate palette file.
    pub fn external_palette(mut self, external_palette: bool) -> Self {
        self.external_palette = Some(external_palette);
        self
    }

    /// Build the options, using defaults for unset fields.
    pub fn build(self) -> EncodeOptions {
        let default = EncodeOptions::default();
        EncodeOptions {
            dither: self.dither.unwrap_or(default.dither),
            mipmaps: self.mipmaps.unwrap_or(default.mipmaps),
            global_index: self.global_index.or(default.global_index),
            external_palette: self.external_palette.unwrap_or(default.external_palette),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_8888::Color8888;
    use crate::test_prelude::*;

    fn indexed_info() -> TextureInfo {
        let mut info = TextureInfo::new(ContainerKind::Gvr, 8, 8);
        info.pixel_format = Some(PixelFormat::Index4);
        info
    }

    #[test]
    fn builder_defaults_match_default() {
        assert_eq!(EncodeOptionsBuilder::new().build(), EncodeOptions::default());
    }

    #[test]
    fn builder_sets_fields() {
        let options = EncodeOptionsBuilder::new()
            .mipmaps(true)
            .external_palette(true)
            .global_index(GlobalIndex::gcix(3))
            .build();
        assert!(options.mipmaps);
        assert!(options.external_palette);
        assert_eq!(options.global_index, Some(GlobalIndex::gcix(3)));
        assert_eq!(options.dither, DitherMode::None);
    }

    #[test]
    fn unresolved_codes_fail_lazily() {
        let mut info = TextureInfo::new(ContainerKind::Pvr, 8, 8);
        info.pixel_format_code = 3;
        assert_eq!(
            info.require_pixel_format(),
            Err(TextureError::UnsupportedCodec {
                kind: CodecKind::Pixel,
                code: 3
            })
        );
    }

    #[test]
    fn indexed_texture_requires_palette() {
        let image = RgbaImage::filled(8, 8, Color8888::BLACK).unwrap();
        assert_eq!(
            Texture::new(indexed_info(), image, Vec::new(), None),
            Err(TextureError::MissingPalette)
        );
    }

    #[test]
    fn supply_none_is_missing_palette() {
        assert_eq!(
            PaletteSupply::None.resolve(16, PixelFormat::Rgb565),
            Err(TextureError::MissingPalette)
        );
    }

    #[test]
    fn synthetic_supply_is_tagged() {
        let palette = PaletteSupply::SyntheticGrayscale
            .resolve(256, PixelFormat::Rgb5a3)
            .unwrap();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette.source(), PaletteSource::SyntheticGrayscale);
    }

    #[rstest]
    #[case(b"GBIX", Some(GlobalIndexKind::Gbix))]
    #[case(b"GCIX", Some(GlobalIndexKind::Gcix))]
    #[case(b"GVRT", None)]
    fn global_index_magic(#[case] magic: &[u8; 4], #[case] expected: Option<GlobalIndexKind>) {
        assert_eq!(GlobalIndexKind::from_magic(magic), expected);
    }
}
