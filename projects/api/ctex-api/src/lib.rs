#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod api;
pub mod handlers;
pub(crate) mod sniff;

pub use api::{decode, decode_with_palette_file, encode, probe, read_info, EncodeTarget};
pub use handlers::{handler, handlers, GimHandler, GvrHandler, PvrHandler, TextureFormatHandler};
