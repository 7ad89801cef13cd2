//! Per-family texture handlers.
//!
//! Each container family implements [`TextureFormatHandler`]. When the family of a
//! buffer is known, call its handler directly; otherwise [`probe`] or [`handlers`]
//! find the right one.
//!
//! [`probe`]: crate::probe

mod gim;
mod gvr;
mod pvr;

pub use gim::GimHandler;
pub use gvr::GvrHandler;
pub use pvr::PvrHandler;

use ctex_common::{ContainerKind, PaletteSupply, Texture, TextureInfo, TextureResult};

/// Reads one container family.
pub trait TextureFormatHandler: Send + Sync {
    /// Family handled.
    fn kind(&self) -> ContainerKind;

    /// Check if this handler can read the input.
    ///
    /// Only magic codes and declared lengths are inspected; pixel and palette formats
    /// are not resolved.
    fn can_handle(&self, input: &[u8]) -> bool;

    /// File extensions used by this family (lowercase, without leading dot).
    ///
    /// Used to narrow down handlers before detection when a file name is known.
    fn supported_extensions(&self) -> &[&str];

    /// Parse the header without decoding pixels.
    ///
    /// # Errors
    ///
    /// Structural errors only: [`InvalidFormat`] or [`CorruptChunk`]. Unknown format
    /// codes are reported through [`TextureInfo`] instead.
    ///
    /// [`InvalidFormat`]: ctex_common::TextureError::InvalidFormat
    /// [`CorruptChunk`]: ctex_common::TextureError::CorruptChunk
    fn read_info(&self, input: &[u8]) -> TextureResult<TextureInfo>;

    /// Decode the base image, mipmaps and palette.
    ///
    /// # Errors
    ///
    /// Everything [`read_info`] raises, plus codec errors such as
    /// [`UnsupportedCodec`] and [`MissingPalette`].
    ///
    /// [`read_info`]: TextureFormatHandler::read_info
    /// [`UnsupportedCodec`]: ctex_common::TextureError::UnsupportedCodec
    /// [`MissingPalette`]: ctex_common::TextureError::MissingPalette
    fn decode(&self, input: &[u8], supply: &PaletteSupply) -> TextureResult<Texture>;
}

static HANDLERS: [&dyn TextureFormatHandler; 3] = [&GvrHandler, &PvrHandler, &GimHandler];

/// All handlers, in detection order.
#[inline]
pub fn handlers() -> &'static [&'static dyn TextureFormatHandler] {
    &HANDLERS
}

/// The handler for `kind`.
pub fn handler(kind: ContainerKind) -> &'static dyn TextureFormatHandler {
    match kind {
        ContainerKind::Gvr => &GvrHandler,
        ContainerKind::Pvr => &PvrHandler,
        ContainerKind::Gim => &GimHandler,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_has_one_handler() {
        for kind in [ContainerKind::Gvr, ContainerKind::Pvr, ContainerKind::Gim] {
            assert_eq!(handler(kind).kind(), kind);
            assert_eq!(
                handlers().iter().filter(|handler| handler.kind() == kind).count(),
                1
            );
        }
    }

    #[test]
    fn extensions_match_the_family() {
        for handler in handlers() {
            assert!(handler
                .supported_extensions()
                .contains(&handler.kind().extension()));
        }
    }

    #[test]
    fn empty_input_is_not_handled() {
        assert!(handlers().iter().all(|handler| !handler.can_handle(&[])));
    }
}
