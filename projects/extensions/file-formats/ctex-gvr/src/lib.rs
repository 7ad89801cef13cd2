#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod gvp;
pub mod gvr;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use gvp::{likely_gvp, read_gvp, write_gvp};
pub use gvr::{
    decode_gvr, encode_gvr, likely_gvr, parse_gvr, GvrDataFlags, GvrDataFormat, GvrHeader,
    GvrPaletteFormat,
};
pub use settings::{GvrEncodeSettings, GvrEncodeSettingsBuilder};
