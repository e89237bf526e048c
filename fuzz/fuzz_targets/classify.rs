#![no_main]

use libfuzzer_sys::fuzz_target;
use plyboard::{apply, classify, resolve, BoardPosition};

fuzz_target!(|data: &[u8]| {
    let Some((&index, rest)) = data.split_first() else {
        return;
    };
    let Ok(token) = std::str::from_utf8(rest) else {
        return;
    };
    if let Ok(mut ply) = classify(usize::from(index), token) {
        let pos = BoardPosition::new();
        if resolve(&pos, &mut ply).is_ok() {
            if let Ok(next) = apply(&pos, &ply) {
                assert!(next.is_consistent());
            }
        }
    }
});
