use super::TextureFormatHandler;
use ctex_common::{ContainerKind, PaletteSupply, Texture, TextureInfo, TextureResult};
use ctex_gvr::{decode_gvr, likely_gvr, parse_gvr};

/// Handler for GVR textures (GameCube/Wii), optionally behind a `GBIX`/`GCIX` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct GvrHandler;

impl TextureFormatHandler for GvrHandler {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Gvr
    }

    fn can_handle(&self, input: &[u8]) -> bool {
        likely_gvr(input)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["gvr"]
    }

    fn read_info(&self, input: &[u8]) -> TextureResult<TextureInfo> {
        Ok(parse_gvr(input)?.info())
    }

    fn decode(&self, input: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
        decode_gvr(input, supply)
    }
}
