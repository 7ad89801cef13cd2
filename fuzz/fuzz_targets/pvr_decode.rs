#![no_main]

// Arbitrary bytes must decode or fail with an error, never panic or over-read.

use ctex_common::PaletteSupply;
use ctex_pvr::{decode_pvr, parse_pvr, read_pvp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(header) = parse_pvr(data) else {
        return;
    };
    let info = header.info();

    for supply in [PaletteSupply::None, PaletteSupply::SyntheticGrayscale] {
        if let Ok(texture) = decode_pvr(data, &supply) {
            assert_eq!(texture.info, info);
            assert_eq!(texture.image.width(), info.width);
            assert_eq!(texture.image.height(), info.height);
        }
    }
    let _ = read_pvp(data);
});
