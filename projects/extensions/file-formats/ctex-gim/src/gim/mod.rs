//! GIM textures: a file signature followed by a tree of length-prefixed chunks holding
//! the image block, an optional palette block and optional free-text metadata.

pub mod chunks;
pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;
pub mod formats;
pub mod likely_gim;
pub(crate) mod metadata;
pub mod parse_gim;

pub use chunks::{walk_chunks, ChunkHeader, ChunkKind, ChunkMap};
pub use decode::decode_gim;
pub use encode::encode_gim;
pub use formats::{GimPaletteFormat, GimPixelFormat};
pub use likely_gim::likely_gim;
pub use parse_gim::{parse_gim, GimBlock, GimHeader};
