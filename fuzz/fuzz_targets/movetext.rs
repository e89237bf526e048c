#![no_main]

use libfuzzer_sys::fuzz_target;
use plyboard::Game;

fuzz_target!(|data: &[u8]| {
    let Ok(movetext) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(game) = Game::from_movetext("fuzz", movetext) {
        assert_eq!(game.positions().len(), game.plies().len() + 1);
        for pos in game.positions() {
            assert!(pos.is_consistent());
        }
    }
});
