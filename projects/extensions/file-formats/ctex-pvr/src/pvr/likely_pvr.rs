//! Cheap detection of PVR textures.

use super::parse_pvr::parse_pvr;

/// Determines if the given data likely represents a PVR texture.
///
/// Checks the magic codes and that the declared length fits the buffer.
#[inline]
pub fn likely_pvr(data: &[u8]) -> bool {
    parse_pvr(data).is_ok()
}
