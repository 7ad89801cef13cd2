#![no_main]

// The chunk walk must terminate on any input, including zero and negative lengths.

use ctex_common::PaletteSupply;
use ctex_gim::{decode_gim, parse_gim, walk_chunks};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(chunks) = walk_chunks(data) {
        for chunk in [chunks.texture, chunks.palette, chunks.metadata]
            .into_iter()
            .flatten()
        {
            assert!(chunk.end() <= data.len());
        }
    }

    let Ok(header) = parse_gim(data) else {
        return;
    };
    if let Ok(texture) = decode_gim(data, &PaletteSupply::SyntheticGrayscale) {
        assert_eq!(texture.info, header.info());
    }
});
