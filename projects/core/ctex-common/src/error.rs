//! Error taxonomy shared by every texture codec and container crate.
//!
//! Container parsing failures ([`TextureError::InvalidFormat`], [`TextureError::CorruptChunk`])
//! are raised while reading headers. Codec failures ([`TextureError::UnsupportedCodec`],
//! [`TextureError::MissingPalette`]) are raised only once pixels are materialized, so a
//! texture's header stays inspectable even when its payload cannot be decoded.

use core::fmt;
use likely_stable::unlikely;
use thiserror::Error;

/// Result alias used across the `ctex` crates.
pub type TextureResult<T> = Result<T, TextureError>;

/// Why a buffer is not a well-formed instance of the container being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatMismatch {
    /// The magic code is not the one this container uses.
    #[error("magic code does not match the container")]
    BadMagic,

    /// The length field in the header disagrees with the bytes available.
    #[error("declared length {declared} does not match the {actual} bytes available")]
    LengthMismatch {
        /// Length implied by the header.
        declared: usize,
        /// Length actually present.
        actual: usize,
    },

    /// The buffer ends before a field or payload that must be present.
    #[error("input too short: required {required} bytes, got {actual}")]
    Truncated {
        /// Minimum number of bytes needed.
        required: usize,
        /// Number of bytes present.
        actual: usize,
    },
}

/// Which kind of format enumerant could not be resolved to a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Pixel format enumerant.
    Pixel,
    /// Palette entry format enumerant.
    Palette,
    /// Data layout enumerant.
    Data,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecKind::Pixel => "pixel",
            CodecKind::Palette => "palette",
            CodecKind::Data => "data",
        };
        f.write_str(name)
    }
}

/// Structural faults in a chunk stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChunkFault {
    /// A chunk declared a zero or negative length.
    #[error("non-positive chunk length {0}")]
    NonPositiveLength(i32),

    /// A chunk extends past the end of the buffer.
    #[error("chunk length {length} exceeds the {remaining} remaining bytes")]
    OutOfRange {
        /// Declared chunk length.
        length: usize,
        /// Bytes left from the chunk start.
        remaining: usize,
    },

    /// The walk finished somewhere other than the declared end-of-file offset.
    #[error("chunk walk ended at {actual}, end-of-file marker declared {declared}")]
    EofMismatch {
        /// Offset from the end-of-file marker.
        declared: usize,
        /// Offset where the walk stopped.
        actual: usize,
    },

    /// A chunk kind that must be present was never found.
    #[error("required chunk {0:#06x} is missing")]
    MissingChunk(u16),
}

/// Errors raised by texture decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    /// The buffer is not this container type, or its declared length is inconsistent.
    #[error("invalid container: {0}")]
    InvalidFormat(#[from] FormatMismatch),

    /// A recognized format enumerant has no implemented codec.
    #[error("unsupported {kind} format {code:#04x}")]
    UnsupportedCodec {
        /// What the enumerant describes.
        kind: CodecKind,
        /// Raw enumerant value from the header or settings.
        code: u16,
    },

    /// Width/height violate the layout's shape constraint, or a size parameter is out of range.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// An indexed texture needs an external palette and none was supplied.
    #[error("texture requires an external palette but none was supplied")]
    MissingPalette,

    /// A palette has more entries than its pixel format can address.
    #[error("palette has {entries} entries, format allows at most {max}")]
    PaletteOverflow {
        /// Entries in the palette.
        entries: usize,
        /// Maximum entries the format addresses.
        max: usize,
    },

    /// Pixel data references an index the supplied palette does not have.
    #[error("palette index {index} out of range for {entries} entries")]
    PaletteIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Entries in the palette.
        entries: usize,
    },

    /// The chunk stream of a chunked container is malformed.
    #[error("corrupt chunk at offset {offset:#x}: {fault}")]
    CorruptChunk {
        /// Offset of the chunk header.
        offset: usize,
        /// What is wrong with it.
        fault: ChunkFault,
    },

    /// Encode settings contradict each other or the selected format.
    #[error("invalid encode settings: {0}")]
    InvalidSettings(&'static str),
}

impl TextureError {
    /// Shorthand for an [`TextureError::InvalidDimensions`] error.
    #[inline]
    pub fn dimensions(width: u32, height: u32, reason: &'static str) -> Self {
        TextureError::InvalidDimensions {
            width,
            height,
            reason,
        }
    }
}

/// Fails with [`FormatMismatch::Truncated`] if `data` holds fewer than `required` bytes.
#[inline]
pub fn require_len(data: &[u8], required: usize) -> TextureResult<()> {
    if unlikely(data.len() < required) {
        return Err(FormatMismatch::Truncated {
            required,
            actual: data.len(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(0, 0, true)]
    #[case(4, 3, false)]
    #[case(4, 4, true)]
    #[case(4, 5, true)]
    fn require_len_checks_minimum(
        #[case] required: usize,
        #[case] actual: usize,
        #[case] ok: bool,
    ) {
        let data = vec![0u8; actual];
        assert_eq!(require_len(&data, required).is_ok(), ok);
    }

    #[test]
    fn truncated_error_reports_sizes() {
        let err = require_len(&[0u8; 2], 16).unwrap_err();
        assert_eq!(
            err,
            TextureError::InvalidFormat(FormatMismatch::Truncated {
                required: 16,
                actual: 2
            })
        );
    }

    #[test]
    fn unsupported_codec_displays_kind_and_code() {
        let err = TextureError::UnsupportedCodec {
            kind: CodecKind::Pixel,
            code: 3,
        };
        assert_eq!(err.to_string(), "unsupported pixel format 0x03");
    }
}
