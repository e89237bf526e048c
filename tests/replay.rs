use plyboard::{
    replay_games_with, BoardPosition, Color, Game, GameError, GameText, MoveApplicationError,
    PlyError, ReplayOptions, Role, Square, Winner,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Record {
    name: String,
    movetext: String,
    winner: String,
    plies: usize,
    board_fen: String,
}

fn records() -> Vec<Record> {
    let mut reader = csv::Reader::from_path("tests/games.csv").expect("failed to open test suite");
    reader
        .deserialize()
        .map(|record| record.expect("valid record"))
        .collect()
}

fn winner(name: &str) -> Option<Winner> {
    match name {
        "white" => Some(Winner::White),
        "black" => Some(Winner::Black),
        "draw" => Some(Winner::Draw),
        "" => None,
        _ => panic!("unknown winner {name:?}"),
    }
}

fn check_game(record: &Record, game: &Game) {
    assert_eq!(game.name(), record.name);
    assert_eq!(game.plies().len(), record.plies, "{}", record.name);
    assert_eq!(game.positions().len(), record.plies + 1, "{}", record.name);
    assert_eq!(game.winner(), winner(&record.winner), "{}", record.name);
    assert_eq!(game.final_position().board_fen(), record.board_fen, "{}", record.name);

    for pos in game.positions() {
        assert!(pos.is_consistent(), "{}: {pos:?}", record.name);
    }
    for (i, ply) in game.plies().iter().enumerate() {
        assert_eq!(ply.index, i);
        assert_eq!(ply.color, Color::from_ply_index(i));
    }
}

#[test]
fn test_games() {
    for record in records() {
        let game = Game::from_movetext(record.name.as_str(), &record.movetext).expect("replays");
        check_game(&record, &game);
    }
}

#[test]
fn test_games_in_parallel() {
    let records = records();
    let texts = records
        .iter()
        .map(|r| GameText::new(r.name.as_str(), r.movetext.as_str()))
        .collect();
    let results = replay_games_with(texts, &ReplayOptions { workers: 3 });
    assert_eq!(results.len(), records.len());
    for (record, result) in records.iter().zip(&results) {
        check_game(record, result.as_ref().expect("replays"));
    }
}

#[test]
fn test_history_is_immutable() {
    let game = Game::from_movetext("", "1. e4 e5 2. Nf3 Nc6").expect("replays");
    assert_eq!(game.positions()[0], BoardPosition::new());
    let white_knights = Role::Knight.of(Color::White);
    assert_eq!(game.positions()[2].by_piece(white_knights).count(), 2);
    assert!(!game.positions()[2].by_piece(white_knights).contains(Square::F3));
    assert!(game.positions()[3].by_piece(white_knights).contains(Square::F3));
}

#[test]
fn test_failure_is_reported() {
    let err = Game::from_movetext("", "1. e4 a6 2. e5 a5 3. exd6")
        .expect_err("no pawn to take en passant");
    let err = match err {
        GameError::Replay(err) => err,
        other => panic!("expected replay error, got {other:?}"),
    };
    assert_eq!(err.ply_index, 4);
    assert_eq!(err.move_number, 3);
    assert_eq!(err.color, Color::White);
    assert_eq!(err.raw, "exd6");
    assert!(matches!(
        err.error,
        PlyError::Application(MoveApplicationError::NoEnPassantPawn { .. })
    ));
    assert_eq!(
        err.to_string(),
        "move 3. exd6 (white): no enemy pawn for en passant on d5"
    );
}
