#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use numflip_core::classify::classify;
use numflip_core::format::NumberFormat;
use numflip_core::identity::SequentialIds;
use numflip_core::reconcile::{live_ids_unique, reconcile};

#[derive(Arbitrary, Debug)]
enum Edit {
    Push(u8),
    Pop,
    Point,
    Sign,
    Clear,
}

fuzz_target!(|edits: Vec<Edit>| {
    let nf = NumberFormat::default();
    let mut ids = SequentialIds::new();
    let mut raw = String::new();
    let mut previous = Vec::new();

    for edit in edits.iter().take(256) {
        match edit {
            Edit::Push(d) => raw.push(char::from(b'0' + d % 10)),
            Edit::Pop => {
                raw.pop();
            }
            Edit::Point => raw.push('.'),
            Edit::Sign => raw.insert(0, '-'),
            Edit::Clear => raw.clear(),
        }
        let value = nf.format_input(&raw);
        let tokens = classify(&value, '.', ',');
        let pass = reconcile(&tokens, &previous, &mut ids);
        assert!(live_ids_unique(&pass));
        assert_eq!(pass.reused() + pass.fresh(), tokens.len());
        previous = pass.into_vec();
    }
});
