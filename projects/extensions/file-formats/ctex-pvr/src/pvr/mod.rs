//! PVR textures: an optional `GBIX`/`GCIX` header, a `PVRT` header and little-endian
//! twiddled, linear or vector-quantized pixel data.

pub(crate) mod constants;
pub(crate) mod decode;
pub(crate) mod encode;
pub mod formats;
pub mod likely_pvr;
pub mod parse_pvr;

pub use decode::decode_pvr;
pub use encode::encode_pvr;
pub use formats::{PvrDataFormat, PvrPixelFormat};
pub use likely_pvr::likely_pvr;
pub use parse_pvr::{parse_pvr, PvrHeader};
