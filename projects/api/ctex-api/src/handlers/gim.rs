use super::TextureFormatHandler;
use ctex_common::{ContainerKind, PaletteSupply, Texture, TextureInfo, TextureResult};
use ctex_gim::{decode_gim, likely_gim, parse_gim};

/// Handler for GIM chunked textures (PSP).
#[derive(Debug, Clone, Copy, Default)]
pub struct GimHandler;

impl TextureFormatHandler for GimHandler {
    fn kind(&self) -> ContainerKind {
        ContainerKind::Gim
    }

    fn can_handle(&self, input: &[u8]) -> bool {
        likely_gim(input)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["gim"]
    }

    fn read_info(&self, input: &[u8]) -> TextureResult<TextureInfo> {
        Ok(parse_gim(input)?.info())
    }

    fn decode(&self, input: &[u8], supply: &PaletteSupply) -> TextureResult<Texture> {
        decode_gim(input, supply)
    }
}
