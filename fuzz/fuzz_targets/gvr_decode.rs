#![no_main]

// Arbitrary bytes must decode or fail with an error, never panic or over-read.

use ctex_common::PaletteSupply;
use ctex_gvr::{decode_gvr, parse_gvr, read_gvp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(header) = parse_gvr(data) else {
        return;
    };
    let info = header.info();

    for supply in [PaletteSupply::None, PaletteSupply::SyntheticGrayscale] {
        if let Ok(texture) = decode_gvr(data, &supply) {
            assert_eq!(texture.info, info);
            assert_eq!(texture.image.width(), info.width);
            assert_eq!(texture.image.height(), info.height);
        }
    }
    let _ = read_gvp(data);
});
