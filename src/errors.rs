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

//! Error types.
//!
//! Every failure kind has its own small type. [`ClassifyError`] and
//! [`PlyError`] compose them for the classifier and for a single replay
//! step, and [`ReplayError`] attaches the ply context a caller needs to
//! report a broken game.

use std::{error::Error, fmt};

use crate::{Color, Role, Square};

/// Malformed or unrecognized move text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The first character does not start a pawn move, a piece move or
    /// castling.
    InvalidToken,
    /// The move is missing its two destination characters.
    MissingDestination,
    /// A promotion marker `=` is not followed by a piece letter.
    MissingPromotion,
    /// The classified flags do not describe a known kind of move.
    UnrecognizedMoveType,
    /// A `{` comment or `(` variation is not closed.
    Unterminated,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseError::InvalidToken => "invalid move token",
            ParseError::MissingDestination => "move is missing its destination square",
            ParseError::MissingPromotion => "promotion is missing its piece",
            ParseError::UnrecognizedMoveType => "unrecognized move type",
            ParseError::Unterminated => "unterminated comment or variation",
        })
    }
}

impl Error for ParseError {}

/// Index or coordinate outside its valid range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RangeError {
    Rank(i64),
    File(i64),
    Square(i64),
    RankChar(char),
    FileChar(char),
    PlyIndex { index: i64, len: usize },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RangeError::Rank(rank) => write!(f, "rank {rank} out of range 0..=7"),
            RangeError::File(file) => write!(f, "file {file} out of range 0..=7"),
            RangeError::Square(square) => write!(f, "square {square} out of range 0..=63"),
            RangeError::RankChar(ch) => write!(f, "invalid rank character {ch:?}"),
            RangeError::FileChar(ch) => write!(f, "invalid file character {ch:?}"),
            RangeError::PlyIndex { index, len } => {
                write!(f, "ply index {index} out of range for {len} plies")
            }
        }
    }
}

impl Error for RangeError {}

/// A letter that has no entry in one of the fixed lookup tables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LookupError {
    /// Unknown piece letter.
    Piece(char),
    /// Piece letter that can not be promoted to.
    Promotion(char),
    /// Unknown file letter.
    File(char),
    /// Unknown board position key.
    BoardKey(char),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LookupError::Piece(ch) => write!(f, "unknown piece letter {ch:?}"),
            LookupError::Promotion(ch) => write!(f, "can not promote to {ch:?}"),
            LookupError::File(ch) => write!(f, "unknown file letter {ch:?}"),
            LookupError::BoardKey(ch) => write!(f, "unknown board position key {ch:?}"),
        }
    }
}

impl Error for LookupError {}

/// No square satisfies the geometry, occupancy and disambiguation
/// constraints of a ply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveResolutionError {
    /// The ply has no destination square to search from.
    NoDestination,
    /// No friendly pawn one or two squares behind the destination.
    NoPawn { to: Square },
    /// A pawn capture without a file letter before `x`.
    NoCaptureFile,
    /// The character before `x` of a pawn capture is not a file.
    Lookup(LookupError),
    /// No friendly piece of the role can reach the destination.
    NoCandidate { role: Role, to: Square },
}

impl fmt::Display for MoveResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveResolutionError::NoDestination => f.write_str("move has no destination"),
            MoveResolutionError::NoPawn { to } => write!(f, "no pawn can advance to {to}"),
            MoveResolutionError::NoCaptureFile => f.write_str("pawn capture without source file"),
            MoveResolutionError::Lookup(ref err) => fmt::Display::fmt(err, f),
            MoveResolutionError::NoCandidate { role, to } => {
                write!(f, "no {role:?} can move to {to}")
            }
        }
    }
}

impl Error for MoveResolutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveResolutionError::Lookup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LookupError> for MoveResolutionError {
    fn from(err: LookupError) -> MoveResolutionError {
        MoveResolutionError::Lookup(err)
    }
}

/// The board does not have the shape a resolved move requires.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MoveApplicationError {
    /// A capture found an empty or friendly destination.
    NoOpposingPiece { at: Square },
    /// A non-capture found its destination occupied.
    DestinationOccupied { at: Square },
    /// En passant found no enemy pawn behind the destination.
    NoEnPassantPawn { at: Square },
    /// The moving piece is not on its source square.
    MissingMover { role: Role, at: Square },
}

impl fmt::Display for MoveApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MoveApplicationError::NoOpposingPiece { at } => {
                write!(f, "no opposing piece at destination {at}")
            }
            MoveApplicationError::DestinationOccupied { at } => {
                write!(f, "destination {at} occupied")
            }
            MoveApplicationError::NoEnPassantPawn { at } => {
                write!(f, "no enemy pawn for en passant on {at}")
            }
            MoveApplicationError::MissingMover { role, at } => {
                write!(f, "no {role:?} to move on {at}")
            }
        }
    }
}

impl Error for MoveApplicationError {}

/// Missing input to [`detect_winner`](crate::detect_winner).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgumentError {
    MissingGame,
    NoPlies,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ArgumentError::MissingGame => f.write_str("no game given"),
            ArgumentError::NoPlies => f.write_str("game has no plies"),
        }
    }
}

impl Error for ArgumentError {}

/// Error when [detecting the winner](crate::Game::detect_winner) of a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WinnerError {
    Argument(ArgumentError),
    Range(RangeError),
}

impl fmt::Display for WinnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinnerError::Argument(err) => err.fmt(f),
            WinnerError::Range(err) => err.fmt(f),
        }
    }
}

impl Error for WinnerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WinnerError::Argument(err) => Some(err),
            WinnerError::Range(err) => Some(err),
        }
    }
}

impl From<ArgumentError> for WinnerError {
    fn from(err: ArgumentError) -> WinnerError {
        WinnerError::Argument(err)
    }
}

impl From<RangeError> for WinnerError {
    fn from(err: RangeError) -> WinnerError {
        WinnerError::Range(err)
    }
}

/// Error when classifying a single move token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClassifyError {
    Parse(ParseError),
    Range(RangeError),
    Lookup(LookupError),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Parse(err) => err.fmt(f),
            ClassifyError::Range(err) => err.fmt(f),
            ClassifyError::Lookup(err) => err.fmt(f),
        }
    }
}

impl Error for ClassifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassifyError::Parse(err) => Some(err),
            ClassifyError::Range(err) => Some(err),
            ClassifyError::Lookup(err) => Some(err),
        }
    }
}

impl From<ParseError> for ClassifyError {
    fn from(err: ParseError) -> ClassifyError {
        ClassifyError::Parse(err)
    }
}

impl From<RangeError> for ClassifyError {
    fn from(err: RangeError) -> ClassifyError {
        ClassifyError::Range(err)
    }
}

impl From<LookupError> for ClassifyError {
    fn from(err: LookupError) -> ClassifyError {
        ClassifyError::Lookup(err)
    }
}

/// Error when turning one ply into the next position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlyError {
    Classify(ClassifyError),
    Parse(ParseError),
    Resolution(MoveResolutionError),
    Application(MoveApplicationError),
}

impl fmt::Display for PlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlyError::Classify(err) => err.fmt(f),
            PlyError::Parse(err) => err.fmt(f),
            PlyError::Resolution(err) => err.fmt(f),
            PlyError::Application(err) => err.fmt(f),
        }
    }
}

impl Error for PlyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlyError::Classify(err) => Some(err),
            PlyError::Parse(err) => Some(err),
            PlyError::Resolution(err) => Some(err),
            PlyError::Application(err) => Some(err),
        }
    }
}

impl From<ClassifyError> for PlyError {
    fn from(err: ClassifyError) -> PlyError {
        PlyError::Classify(err)
    }
}

impl From<ParseError> for PlyError {
    fn from(err: ParseError) -> PlyError {
        PlyError::Parse(err)
    }
}

impl From<MoveResolutionError> for PlyError {
    fn from(err: MoveResolutionError) -> PlyError {
        PlyError::Resolution(err)
    }
}

impl From<MoveApplicationError> for PlyError {
    fn from(err: MoveApplicationError) -> PlyError {
        PlyError::Application(err)
    }
}

/// A [`PlyError`] with the ply it happened on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplayError {
    pub ply_index: usize,
    pub move_number: u32,
    pub color: Color,
    pub raw: String,
    pub error: PlyError,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dots = self.color.fold_wb(".", "...");
        write!(
            f,
            "move {}{} {} ({}): {}",
            self.move_number, dots, self.raw, self.color, self.error
        )
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Error when building a [`Game`](crate::Game) from movetext.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameError {
    /// The movetext could not be split into moves.
    Movetext(ParseError),
    /// A move could not be replayed.
    Replay(ReplayError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Movetext(err) => write!(f, "invalid movetext: {err}"),
            GameError::Replay(err) => err.fmt(f),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Movetext(err) => Some(err),
            GameError::Replay(err) => Some(err),
        }
    }
}

impl From<ReplayError> for GameError {
    fn from(err: ReplayError) -> GameError {
        GameError::Replay(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_error_display() {
        let err = ReplayError {
            ply_index: 3,
            move_number: 2,
            color: Color::Black,
            raw: "Nf6".to_owned(),
            error: PlyError::Resolution(MoveResolutionError::NoCandidate {
                role: Role::Knight,
                to: Square::F6,
            }),
        };
        assert_eq!(
            err.to_string(),
            "move 2... Nf6 (black): no Knight can move to f6"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_source_chain() {
        let err = PlyError::from(ClassifyError::from(ParseError::InvalidToken));
        let inner = err.source().and_then(Error::source).expect("nested source");
        assert_eq!(inner.to_string(), "invalid move token");
    }
}
