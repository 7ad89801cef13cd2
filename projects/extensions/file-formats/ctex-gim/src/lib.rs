#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod gim;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use gim::{
    decode_gim, encode_gim, likely_gim, parse_gim, walk_chunks, ChunkHeader, ChunkKind, ChunkMap,
    GimBlock, GimHeader, GimPaletteFormat, GimPixelFormat,
};
pub use settings::{GimEncodeSettings, GimEncodeSettingsBuilder};
