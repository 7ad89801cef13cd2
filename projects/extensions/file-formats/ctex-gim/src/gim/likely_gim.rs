//! Cheap detection of GIM textures.

use super::chunks::walk_chunks;
use super::constants::{FILE_HEADER_SIZE, GIM_SIGNATURE};

/// Determines if the given data likely represents a GIM texture.
///
/// Checks the signature and that the chunk stream is well formed. Blocks are not parsed.
#[inline]
pub fn likely_gim(data: &[u8]) -> bool {
    data.len() >= FILE_HEADER_SIZE
        && data[..GIM_SIGNATURE.len()] == GIM_SIGNATURE
        && walk_chunks(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gim::chunks::{write_container_chunk, ChunkKind};
    use crate::test_prelude::*;

    fn empty_file() -> Vec<u8> {
        let mut data = GIM_SIGNATURE.to_vec();
        data.extend_from_slice(&[0; 4]);
        write_container_chunk(ChunkKind::EndOfFile, &[], &mut data);
        data
    }

    #[test]
    fn likely_gim_accepts_well_formed_stream() {
        assert!(likely_gim(&empty_file()));
    }

    #[test]
    fn likely_gim_rejects_truncated_stream() {
        let data = empty_file();
        assert!(!likely_gim(&data[..data.len() - 1]));
    }

    #[test]
    fn likely_gim_rejects_other_signature() {
        let mut data = empty_file();
        data[..4].copy_from_slice(b"GVRT");
        assert!(!likely_gim(&data));
    }
}
