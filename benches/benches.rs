use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use plyboard::{
    classify, movetext, replay, replay_games_with, resolve_source, BoardPosition, Game, GameText,
    ReplayOptions,
};

const CASTLES: &str = "1. e4 d5 2. e5 f5 3. exf6 Nxf6 4. Nf3 Nc6 5. Bb5 Bd7 6. O-O e5 7. d4 Qe7 \
                       8. Re1 O-O-O 1/2-1/2";

const SICILIAN: [&str; 11] = [
    "e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3", "a6", "*",
];

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| {
            for (index, san) in black_box(SICILIAN).into_iter().enumerate() {
                black_box(classify(index, san).expect("valid move"));
            }
        })
    });
}

fn bench_resolve_queen(c: &mut Criterion) {
    let pos = BoardPosition::new();
    let ply = classify(0, "Qh5").expect("valid move");
    c.bench_function("resolve queen", |b| {
        b.iter(|| black_box(resolve_source(black_box(&pos), black_box(&ply))))
    });
}

fn bench_replay(c: &mut Criterion) {
    c.bench_function("replay sicilian", |b| {
        b.iter(|| replay(BoardPosition::new(), black_box(SICILIAN)).expect("replays"))
    });
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| movetext::tokenize(black_box(CASTLES)).expect("valid movetext"))
    });
}

fn bench_from_movetext(c: &mut Criterion) {
    c.bench_function("from movetext", |b| {
        b.iter(|| Game::from_movetext("castles", black_box(CASTLES)).expect("replays"))
    });
}

fn bench_replay_games(c: &mut Criterion) {
    let texts: Vec<GameText> = (0..256)
        .map(|i| GameText::new(format!("game {i}"), CASTLES))
        .collect();
    for workers in [1, 4] {
        c.bench_function(&format!("replay 256 games on {workers} workers"), |b| {
            b.iter(|| replay_games_with(texts.clone(), &ReplayOptions { workers }))
        });
    }
}

criterion_group!(
    benches,
    bench_classify,
    bench_resolve_queen,
    bench_replay,
    bench_tokenize,
    bench_from_movetext,
    bench_replay_games,
);
criterion_main!(benches);
