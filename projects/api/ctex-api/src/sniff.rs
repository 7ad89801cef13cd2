//! Magic-only container detection, used to pick the parser whose error is reported.

use ctex_common::{ContainerKind, GlobalIndexKind};
use endian_writer::{EndianReader, LittleEndianReader};

const GIM_SIGNATURE: &[u8] = b"MIG.00.1PSP\0";
const GVRT_MAGIC: &[u8] = b"GVRT";
const PVRT_MAGIC: &[u8] = b"PVRT";

/// GVR global index headers are always 16 bytes.
const GVR_TEXTURE_OFFSET: usize = 0x10;
/// PVR global index headers locate `PVRT` with their own length field.
const PVR_LENGTH_OFFSET: usize = 0x04;
const PVR_LENGTH_BIAS: usize = 0x08;

fn magic_at(buffer: &[u8], offset: usize, magic: &[u8]) -> bool {
    buffer
        .get(offset..)
        .is_some_and(|rest| rest.starts_with(magic))
}

/// Container whose magic codes appear in `buffer`, without checking any length.
pub(crate) fn sniff_magic(buffer: &[u8]) -> Option<ContainerKind> {
    if buffer.starts_with(GIM_SIGNATURE) {
        return Some(ContainerKind::Gim);
    }

    let prefix = buffer.get(..4)?;
    if GlobalIndexKind::from_magic(prefix).is_none() {
        return match prefix {
            b"GVRT" => Some(ContainerKind::Gvr),
            b"PVRT" => Some(ContainerKind::Pvr),
            _ => None,
        };
    }

    if magic_at(buffer, GVR_TEXTURE_OFFSET, GVRT_MAGIC) {
        return Some(ContainerKind::Gvr);
    }
    if buffer.len() < PVR_LENGTH_OFFSET + 4 {
        return None;
    }
    // SAFETY: buffer.len() >= 8, so the length field is in bounds.
    let length = unsafe {
        LittleEndianReader::new(buffer.as_ptr()).read_u32_at(PVR_LENGTH_OFFSET as isize)
    } as usize;
    magic_at(buffer, PVR_LENGTH_BIAS.saturating_add(length), PVRT_MAGIC)
        .then_some(ContainerKind::Pvr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn global_index(length: u32, magic: &[u8]) -> Vec<u8> {
        let mut data = b"GBIX".to_vec();
        data.extend_from_slice(&length.to_le_bytes());
        data.resize(8 + length as usize, 0);
        data.extend_from_slice(magic);
        data
    }

    #[test]
    fn bare_magics() {
        assert_eq!(sniff_magic(b"GVRT"), Some(ContainerKind::Gvr));
        assert_eq!(sniff_magic(b"PVRT"), Some(ContainerKind::Pvr));
        assert_eq!(sniff_magic(b"MIG.00.1PSP\0"), Some(ContainerKind::Gim));
        assert_eq!(sniff_magic(b"DDS "), None);
        assert_eq!(sniff_magic(b"GV"), None);
    }

    #[test]
    fn global_index_prefixes() {
        assert_eq!(sniff_magic(&global_index(8, b"GVRT")), Some(ContainerKind::Gvr));
        assert_eq!(sniff_magic(&global_index(8, b"PVRT")), Some(ContainerKind::Pvr));
        assert_eq!(sniff_magic(&global_index(4, b"PVRT")), Some(ContainerKind::Pvr));
        assert_eq!(sniff_magic(&global_index(100, b"")), None);
        assert_eq!(sniff_magic(b"GBIX"), None);
    }
}
