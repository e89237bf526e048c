#![no_main]

use libfuzzer_sys::fuzz_target;
use plyboard::{square_from_rank_file, Square};

fuzz_target!(|input: (Square, i8, i8)| {
    let (sq, delta_rank, delta_file) = input;
    let (rank, file) = sq.rank_file();
    assert_eq!(square_from_rank_file(i64::from(rank), i64::from(file)), Ok(sq));

    let moved = square_from_rank_file(
        i64::from(rank) + i64::from(delta_rank),
        i64::from(file) + i64::from(delta_file),
    )
    .ok();
    assert_eq!(sq.offset(delta_rank, delta_file), moved);
});
