#![no_main]

// Whatever `probe` recognizes must also parse through `read_info`.

use ctex_api::{handler, probe, read_info};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some(kind) = probe(data) else {
        return;
    };
    assert!(handler(kind).can_handle(data));
    let info = read_info(data).expect("probed buffer must parse");
    assert_eq!(info.container, kind);
});
