#![no_main]

use libfuzzer_sys::fuzz_target;
use numflip_core::format::{NumberFormat, format_number};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let nf = NumberFormat::default();
    let once = nf.format_input(&raw);
    assert_eq!(format_number(&once, '.', ',', 2), once);
});
