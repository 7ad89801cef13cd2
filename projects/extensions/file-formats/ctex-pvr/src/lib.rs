#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod pvp;
pub mod pvr;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use pvp::{likely_pvp, read_pvp, write_pvp};
pub use pvr::{
    decode_pvr, encode_pvr, likely_pvr, parse_pvr, PvrDataFormat, PvrHeader, PvrPixelFormat,
};
pub use settings::{PvrEncodeSettings, PvrEncodeSettingsBuilder};
