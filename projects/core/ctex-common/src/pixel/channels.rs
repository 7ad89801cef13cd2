//! Channel width conversions between packed fields and 8-bit channels.

/// Expands a `bits`-wide channel to 8 bits with `value * 255 / max` integer scaling.
#[inline(always)]
pub(crate) const fn expand(value: u32, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((value & max) * 255 / max) as u8
}

/// Reduces an 8-bit channel to `bits` wide, rounding to the nearest level.
#[inline(always)]
pub(crate) const fn reduce(value: u8, bits: u32) -> u32 {
    let max = (1u32 << bits) - 1;
    (value as u32 * max + 127) / 255
}
