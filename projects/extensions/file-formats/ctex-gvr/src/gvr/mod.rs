//! GVR textures: an optional `GBIX`/`GCIX` header, a `GVRT` header and big-endian tiled
//! pixel data.

pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;
pub mod formats;
pub mod likely_gvr;
pub mod parse_gvr;

pub use decode::decode_gvr;
pub use encode::encode_gvr;
pub use formats::{GvrDataFlags, GvrDataFormat, GvrPaletteFormat};
pub use likely_gvr::likely_gvr;
pub use parse_gvr::{parse_gvr, GvrHeader};
