use super::TextureFormatHandler;
use ctex_common::{ContainerKind, PaletteSupply, Texture, TextureInfo, TextureResult};
use ctex_pvr::{decode_pvr, likely_pvr, parse_pvr};

/// Handler for PVR textures (Dreamcast), optionally behind a `GBIX`/`GCIX` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct PvrHandler;

impl TextureFormatHandler for PvrHandler {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Pvr
    }

    fn can_handle(&self, input: &[u8]) -> bool {
        likely_pvr(input)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pvr"]
    }

    fn read_info(&self, input: &[u8]) -> TextureResult<TextureInfo> {
        Ok(parse_pvr(input)?.info())
    }

    fn decode(&self, input: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
        decode_pvr(input, supply)
    }
}
