#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod block;
pub mod color_8888;
pub mod error;
pub mod image;
pub mod layout;
pub mod mipmap;
pub mod palette;
pub mod pixel;
pub mod texture;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use color_8888::Color8888;
pub use error::{ChunkFault, CodecKind, FormatMismatch, TextureError, TextureResult};
pub use image::RgbaImage;
pub use layout::DataLayout;
pub use palette::{Palette, PaletteCodec, PaletteSource};
pub use pixel::{Endian, PixelCodec, PixelFormat};
pub use texture::{
    ContainerKind, DitherMode, EncodeOptions, EncodeOptionsBuilder, EncodedTexture, GlobalIndex,
    GlobalIndexKind, PaletteSupply, Texture, TextureInfo, TextureMetadata,
};
