//! Cheap detection of GVR textures.

use super::parse_gvr::parse_gvr;

/// Determines if the given data likely represents a GVR texture.
///
/// Checks the magic codes and that the declared length fits the buffer. Format codes
/// are not resolved; use [`parse_gvr`] for the header itself.
///
/// [`parse_gvr`]: crate::gvr::parse_gvr::parse_gvr
#[inline]
pub fn likely_gvr(data: &[u8]) -> bool {
    parse_gvr(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn minimal(prefix: &[u8]) -> Vec<u8> {
        let mut data = prefix.to_vec();
        data.extend_from_slice(b"GVRT");
        data.extend_from_slice(&8u32.to_le_bytes());
        data.extend_from_slice(&[0, 0, 0, 0x04, 0, 8, 0, 8]);
        data
    }

    #[test]
    fn likely_gvr_accepts_bare_header() {
        assert!(likely_gvr(&minimal(&[])));
    }

    #[test]
    fn likely_gvr_accepts_global_index_header() {
        let prefix = [b'G', b'B', b'I', b'X', 8, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0];
        assert!(likely_gvr(&minimal(&prefix)));
    }

    #[test]
    fn likely_gvr_rejects_declared_length_past_end() {
        let mut data = minimal(&[]);
        data[4] = 9;
        assert!(!likely_gvr(&data));
    }

    #[test]
    fn likely_gvr_rejects_other_magic() {
        let mut data = minimal(&[]);
        data[..4].copy_from_slice(b"PVRT");
        assert!(!likely_gvr(&data));
    }

    #[test]
    fn likely_gvr_rejects_empty_data() {
        assert!(!likely_gvr(&[]));
    }
}
