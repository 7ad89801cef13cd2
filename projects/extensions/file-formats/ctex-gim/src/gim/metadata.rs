//! Free-text metadata chunk: four NUL-terminated strings padded to 16 bytes.

use alloc::string::String;
use alloc::vec::Vec;
use ctex_common::{TextureError, TextureMetadata, TextureResult};

const ALIGN: usize = 16;

#[inline]
fn fields(metadata: &TextureMetadata) -> [&str; 4] {
    [
        metadata.original_filename.as_str(),
        metadata.user.as_str(),
        metadata.timestamp.as_str(),
        metadata.tool.as_str(),
    ]
}

/// Fails with [`TextureError::InvalidSettings`] if a string cannot be stored.
pub(crate) fn validate_metadata(metadata: &TextureMetadata) -> TextureResult<()> {
    if fields(metadata).iter().any(|field| field.contains('\0')) {
        return Err(TextureError::InvalidSettings(
            "GIM metadata strings cannot contain NUL",
        ));
    }
    Ok(())
}

pub(crate) fn read_metadata(body: &[u8]) -> TextureMetadata {
    let mut strings = body
        .split(|&byte| byte == 0)
        .map(|field| String::from_utf8_lossy(field).into_owned());
    let mut next = || strings.next().unwrap_or_default();
    TextureMetadata {
        original_filename: next(),
        user: next(),
        timestamp: next(),
        tool: next(),
    }
}

pub(crate) fn write_metadata(metadata: &TextureMetadata) -> Vec<u8> {
    let mut out = Vec::new();
    for field in fields(metadata) {
        out.extend_from_slice(field.as_bytes());
        out.push(0);
    }
    out.resize(out.len().next_multiple_of(ALIGN), 0);
    out
}
