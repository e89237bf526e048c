// This file is part of the plyboard library.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Replay whole games.
//!
//! A [`Game`] holds the plies of one game together with the position before
//! the first ply and after each ply. Independent games can be replayed on
//! several threads with [`replay_games()`].

use std::{fmt, num::NonZeroUsize, thread};

use tracing::{debug, debug_span, trace, warn};

use crate::{
    classify,
    errors::{ArgumentError, GameError, PlyError, RangeError, ReplayError, WinnerError},
    m::apply,
    movetext,
    ply::move_number,
    resolve, BoardPosition, Color, Ply,
};

/// The outcome recorded by a game's result token.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl Winner {
    /// Maps `1-0`, `0-1` and `1/2-1/2`. Anything else, including the
    /// unfinished game marker `*`, has no winner.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::Winner;
    ///
    /// assert_eq!(Winner::from_result("0-1"), Some(Winner::Black));
    /// assert_eq!(Winner::from_result("*"), None);
    /// ```
    pub fn from_result(result: &str) -> Option<Winner> {
        match result {
            "1-0" => Some(Winner::White),
            "0-1" => Some(Winner::Black),
            "1/2-1/2" => Some(Winner::Draw),
            _ => None,
        }
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Winner::White => Some(Color::White),
            Winner::Black => Some(Color::Black),
            Winner::Draw => None,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Winner::White => "white",
            Winner::Black => "black",
            Winner::Draw => "draw",
        })
    }
}

/// Classifies, resolves and applies one token.
fn step(pos: &BoardPosition, index: usize, token: &str) -> Result<(Ply, BoardPosition), PlyError> {
    let mut ply = classify(index, token)?;
    resolve(pos, &mut ply)?;
    let next = apply(pos, &ply)?;
    Ok((ply, next))
}

/// A replayed game.
///
/// There is always one more position than plies: `positions()[0]` is the
/// initial position and `positions()[i + 1]` the position after
/// `plies()[i]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    name: String,
    plies: Vec<Ply>,
    positions: Vec<BoardPosition>,
    winner: Option<Winner>,
}

impl Game {
    /// Replays `tokens` from `initial`, one after the other.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] for the first token that can not be
    /// classified, resolved or applied. Replay stops there.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{BoardPosition, Game};
    ///
    /// let game = Game::replay("Ruy Lopez", BoardPosition::new(), ["e4", "e5", "Nf3", "Nc6", "Bb5"])?;
    /// assert_eq!(game.plies().len(), 5);
    /// assert_eq!(game.positions().len(), 6);
    /// assert_eq!(
    ///     game.final_position().board_fen(),
    ///     "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R"
    /// );
    /// # Ok::<_, plyboard::ReplayError>(())
    /// ```
    pub fn replay<I, S>(
        name: impl Into<String>,
        initial: BoardPosition,
        tokens: I,
    ) -> Result<Game, ReplayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens.into_iter();
        let mut plies = Vec::with_capacity(tokens.size_hint().0);
        let mut positions = Vec::with_capacity(tokens.size_hint().0 + 1);
        positions.push(initial);
        let mut current = initial;

        for (index, token) in tokens.enumerate() {
            let token = token.as_ref();
            let (ply, next) = step(&current, index, token).map_err(|error| ReplayError {
                ply_index: index,
                move_number: move_number(index),
                color: Color::from_ply_index(index),
                raw: token.to_owned(),
                error,
            })?;
            trace!(index, raw = %ply.raw, from = ?ply.from, to = ?ply.to, "applied ply");
            plies.push(ply);
            positions.push(next);
            current = next;
        }

        Ok(Game {
            name: name.into(),
            plies,
            positions,
            winner: None,
        })
    }

    /// Tokenizes and replays the movetext of one game from the standard
    /// starting position. If the last token is a result, the winner is set
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the movetext can not be tokenized or a move
    /// can not be replayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{Game, Winner};
    ///
    /// let game = Game::from_movetext("Fool's mate", "1. f3 e5 2. g4 Qh4# 0-1")?;
    /// assert_eq!(game.winner(), Some(Winner::Black));
    /// assert_eq!(game.plies().len(), 5);
    /// # Ok::<_, plyboard::GameError>(())
    /// ```
    pub fn from_movetext(name: impl Into<String>, movetext: &str) -> Result<Game, GameError> {
        let name = name.into();
        let tokens = movetext::tokenize(movetext).map_err(GameError::Movetext)?;

        for (index, token) in tokens.iter().enumerate() {
            if let Some(number) = token.number {
                if number != move_number(index) {
                    warn!(
                        game = %name,
                        index,
                        written = number,
                        expected = move_number(index),
                        "move number does not match ply"
                    );
                }
            }
        }

        let mut game = Game::replay(
            name,
            BoardPosition::new(),
            tokens.iter().map(|token| token.san),
        )?;

        if game.plies.last().is_some_and(Ply::is_result) {
            let last = game.plies.len() - 1;
            game.set_winner_from(last);
        }

        debug!(
            game = %game.name,
            plies = game.plies.len(),
            winner = ?game.winner,
            "replayed game"
        );
        Ok(game)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn positions(&self) -> &[BoardPosition] {
        &self.positions
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn initial_position(&self) -> &BoardPosition {
        &self.positions[0]
    }

    /// The position after the ply at `ply_index`.
    pub fn position_after(&self, ply_index: usize) -> Option<&BoardPosition> {
        self.positions.get(ply_index.checked_add(1)?)
    }

    /// The position after the last ply.
    pub fn final_position(&self) -> &BoardPosition {
        &self.positions[self.positions.len() - 1]
    }

    /// Matches the notation of the ply at `ply_index` against the result
    /// tokens `1-0`, `0-1` and `1/2-1/2`. On a match the winner is recorded,
    /// unless one has been recorded already, and `true` is returned.
    ///
    /// # Errors
    ///
    /// * [`ArgumentError::NoPlies`] if the game has no plies.
    /// * [`RangeError::PlyIndex`] if `ply_index` is negative or not less
    ///   than the number of plies.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{BoardPosition, Game, Winner};
    ///
    /// let mut game = Game::replay("", BoardPosition::new(), ["e4", "e5", "1/2-1/2"])?;
    /// assert!(!game.detect_winner(1)?);
    /// assert!(game.detect_winner(2)?);
    /// assert_eq!(game.winner(), Some(Winner::Draw));
    /// assert!(game.detect_winner(-1).is_err());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn detect_winner(&mut self, ply_index: i64) -> Result<bool, WinnerError> {
        if self.plies.is_empty() {
            return Err(ArgumentError::NoPlies.into());
        }
        let index = usize::try_from(ply_index)
            .ok()
            .filter(|&index| index < self.plies.len())
            .ok_or(RangeError::PlyIndex {
                index: ply_index,
                len: self.plies.len(),
            })?;
        Ok(self.set_winner_from(index))
    }

    fn set_winner_from(&mut self, index: usize) -> bool {
        match Winner::from_result(&self.plies[index].raw) {
            Some(winner) => {
                if self.winner.is_none() {
                    self.winner = Some(winner);
                }
                true
            }
            None => false,
        }
    }
}

/// Replays `tokens` from `initial` and returns only the positions.
///
/// # Errors
///
/// See [`Game::replay()`].
///
/// # Examples
///
/// ```
/// use plyboard::{replay, BoardPosition, Square};
///
/// let positions = replay(BoardPosition::new(), ["d4", "d5"])?;
/// assert_eq!(positions.len(), 3);
/// assert!(positions[2].piece_at(Square::D5).is_some());
/// # Ok::<_, plyboard::ReplayError>(())
/// ```
pub fn replay<I, S>(initial: BoardPosition, tokens: I) -> Result<Vec<BoardPosition>, ReplayError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Game::replay(String::new(), initial, tokens).map(|game| game.positions)
}

/// Free form of [`Game::detect_winner()`] that also accepts a missing game.
///
/// # Errors
///
/// [`ArgumentError::MissingGame`] if `game` is `None`, otherwise as
/// [`Game::detect_winner()`].
pub fn detect_winner(game: Option<&mut Game>, ply_index: i64) -> Result<bool, WinnerError> {
    game.ok_or(ArgumentError::MissingGame)?.detect_winner(ply_index)
}

/// The name and movetext of one game, as split from a PGN file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameText {
    pub name: String,
    pub movetext: String,
}

impl GameText {
    pub fn new(name: impl Into<String>, movetext: impl Into<String>) -> GameText {
        GameText {
            name: name.into(),
            movetext: movetext.into(),
        }
    }
}

/// Settings for [`replay_games_with()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplayOptions {
    /// Number of worker threads. `0` is treated as `1`.
    pub workers: usize,
}

impl Default for ReplayOptions {
    fn default() -> ReplayOptions {
        ReplayOptions {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

/// Replays independent games in parallel with [default
/// options](ReplayOptions::default).
pub fn replay_games(games: Vec<GameText>) -> Vec<Result<Game, GameError>> {
    replay_games_with(games, &ReplayOptions::default())
}

/// Replays independent games on `options.workers` threads. Each game
/// succeeds or fails on its own, and results are returned in input order.
///
/// # Examples
///
/// ```
/// use plyboard::{replay_games_with, GameText, ReplayOptions};
///
/// let results = replay_games_with(
///     vec![
///         GameText::new("ok", "1. e4 e5 2. Nf3"),
///         GameText::new("broken", "1. e4 e5 2. Ke3"),
///     ],
///     &ReplayOptions { workers: 2 },
/// );
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub fn replay_games_with(games: Vec<GameText>, options: &ReplayOptions) -> Vec<Result<Game, GameError>> {
    let len = games.len();
    let workers = options.workers.clamp(1, len.max(1));

    let (send_job, recv_job) = crossbeam::channel::unbounded();
    let (send_result, recv_result) = crossbeam::channel::unbounded();
    for job in games.into_iter().enumerate() {
        if send_job.send(job).is_err() {
            break;
        }
    }
    drop(send_job);

    crossbeam::scope(|scope| {
        for _ in 0..workers {
            let recv_job = recv_job.clone();
            let send_result = send_result.clone();
            scope.spawn(move |_| {
                for (index, text) in recv_job {
                    let GameText { name, movetext } = text;
                    let span = debug_span!("replay_game", index, game = %name);
                    let _entered = span.enter();
                    let result = Game::from_movetext(name, &movetext);
                    if let Err(ref err) = result {
                        warn!(%err, "game replay failed");
                    }
                    if send_result.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
    drop(send_result);

    let mut slots: Vec<Option<Result<Game, GameError>>> = (0..len).map(|_| None).collect();
    for (index, result) in recv_result {
        slots[index] = Some(result);
    }
    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveResolutionError, Role, Square};

    fn game_with_raw(raws: &[&str]) -> Game {
        let plies: Vec<Ply> = raws
            .iter()
            .enumerate()
            .map(|(index, raw)| Ply::new(index, (*raw).to_owned()))
            .collect();
        let positions = vec![BoardPosition::new(); plies.len() + 1];
        Game {
            name: "test".to_owned(),
            plies,
            positions,
            winner: None,
        }
    }

    #[test]
    fn test_detect_winner() {
        let mut game = game_with_raw(&["1-0"]);
        assert_eq!(game.detect_winner(0), Ok(true));
        assert_eq!(game.winner(), Some(Winner::White));

        let mut game = game_with_raw(&["invalid"]);
        assert_eq!(game.detect_winner(0), Ok(false));
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_winner_is_set_once() {
        let mut game = game_with_raw(&["0-1", "1-0"]);
        assert_eq!(game.detect_winner(0), Ok(true));
        assert_eq!(game.detect_winner(1), Ok(true));
        assert_eq!(game.winner(), Some(Winner::Black));
    }

    #[test]
    fn test_detect_winner_errors() {
        let mut game = game_with_raw(&[]);
        assert_eq!(
            game.detect_winner(0),
            Err(WinnerError::Argument(ArgumentError::NoPlies))
        );

        let mut game = game_with_raw(&["e4", "1/2-1/2"]);
        assert_eq!(
            game.detect_winner(-1),
            Err(WinnerError::Range(RangeError::PlyIndex { index: -1, len: 2 }))
        );
        assert_eq!(
            game.detect_winner(2),
            Err(WinnerError::Range(RangeError::PlyIndex { index: 2, len: 2 }))
        );

        assert_eq!(
            detect_winner(None, 0),
            Err(WinnerError::Argument(ArgumentError::MissingGame))
        );
        assert_eq!(detect_winner(Some(&mut game), 1), Ok(true));
        assert_eq!(game.winner(), Some(Winner::Draw));
    }

    #[test]
    fn test_replay_positions() {
        let game = Game::replay("", BoardPosition::new(), ["e4", "c5", "Nf3"]).expect("replays");
        assert_eq!(game.positions().len(), game.plies().len() + 1);
        assert_eq!(game.initial_position(), &BoardPosition::new());
        assert_eq!(
            game.position_after(0).map(BoardPosition::board_fen).as_deref(),
            Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR")
        );
        assert_eq!(game.position_after(3), None);
        assert_eq!(game.position_after(usize::MAX), None);
        assert_eq!(game.plies()[2].from, Some(Square::G1));
    }

    #[test]
    fn test_replay_error_context() {
        let err = Game::replay("", BoardPosition::new(), ["e4", "e5", "Nf3", "Nf5"])
            .expect_err("no knight reaches f5");
        assert_eq!(err.ply_index, 3);
        assert_eq!(err.move_number, 2);
        assert_eq!(err.color, Color::Black);
        assert_eq!(err.raw, "Nf5");
        assert_eq!(
            err.error,
            PlyError::Resolution(MoveResolutionError::NoCandidate {
                role: Role::Knight,
                to: Square::F5
            })
        );
    }

    #[test]
    fn test_from_movetext() {
        let game = Game::from_movetext(
            "Scholar's mate",
            "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6?? 4. Qxf7# 1-0",
        )
        .expect("replays");
        assert_eq!(game.name(), "Scholar's mate");
        assert_eq!(game.winner(), Some(Winner::White));
        assert_eq!(game.plies().len(), 8);
        assert!(game.plies()[6].is_capture());
        assert_eq!(game.final_position(), game.position_after(6).expect("position"));
    }

    #[test]
    fn test_from_movetext_errors() {
        assert!(matches!(
            Game::from_movetext("", "1. e4 {"),
            Err(GameError::Movetext(_))
        ));
        assert!(matches!(
            Game::from_movetext("", "1. e4 e5 2. Qxf7"),
            Err(GameError::Replay(ReplayError { ply_index: 2, .. }))
        ));
    }

    #[test]
    fn test_replay_games_in_order() {
        let texts: Vec<GameText> = (0..20)
            .map(|i| {
                if i % 3 == 0 {
                    GameText::new(format!("broken {i}"), "1. e5")
                } else {
                    GameText::new(format!("game {i}"), "1. d4 d5 2. c4 e6 *")
                }
            })
            .collect();
        let results = replay_games_with(texts, &ReplayOptions { workers: 4 });
        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            match result {
                Ok(game) => {
                    assert_ne!(i % 3, 0);
                    assert_eq!(game.name(), format!("game {i}"));
                    assert_eq!(game.winner(), None);
                }
                Err(_) => assert_eq!(i % 3, 0),
            }
        }
    }

    #[test]
    fn test_replay_games_empty() {
        assert!(replay_games_with(Vec::new(), &ReplayOptions { workers: 0 }).is_empty());
    }
}
