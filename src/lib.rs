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

//! Replay chess games written in Standard Algebraic Notation into a
//! history of bitboard positions.
//!
//! Each position holds one 64 bit occupancy mask per piece kind and color.
//! Moves are not checked for legality: a move is accepted as long as the
//! board has the occupancy it needs.
//!
//! # Examples
//!
//! Replay a game and look at the final position:
//!
//! ```
//! use plyboard::{Game, Winner};
//!
//! let game = Game::from_movetext("Fool's mate", "1. f3 e5 2. g4 Qh4# 0-1")?;
//! assert_eq!(game.winner(), Some(Winner::Black));
//! assert_eq!(
//!     game.final_position().board_fen(),
//!     "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR"
//! );
//! # Ok::<_, plyboard::GameError>(())
//! ```
//!
//! Go step by step:
//!
//! ```
//! use plyboard::{apply, classify, resolve, BoardPosition, Square};
//!
//! let pos = BoardPosition::new();
//!
//! // 1. e4
//! let mut ply = classify(0, "e4")?;
//! resolve(&pos, &mut ply)?;
//! assert_eq!(ply.from, Some(Square::E2));
//!
//! let pos = apply(&pos, &ply)?;
//! assert!(pos.piece_at(Square::E4).is_some());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`](https://docs.rs/tracing/0.1).
//! The library never installs a subscriber.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   positions, plies, games and the types they are built from.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for [`Square`], [`File`], [`Rank`], [`Color`] and [`Role`].

#![doc(html_root_url = "https://docs.rs/plyboard/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod errors;
mod game;
mod m;
mod ply;
mod position;
mod resolve;
mod role;
mod square;
mod types;

pub mod bitboard;
pub mod movetext;
pub mod san;

pub use bitboard::Bitboard;
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color};
pub use errors::{
    ArgumentError, ClassifyError, GameError, LookupError, MoveApplicationError,
    MoveResolutionError, ParseError, PlyError, RangeError, ReplayError, WinnerError,
};
pub use game::{
    detect_winner, replay, replay_games, replay_games_with, Game, GameText, ReplayOptions, Winner,
};
pub use m::{apply, Move};
pub use ply::{Ply, PlyFlags};
pub use position::BoardPosition;
pub use resolve::{resolve, resolve_source};
pub use role::{ByRole, Role};
pub use san::classify;
pub use square::{square_from_rank_file, File, Rank, Square};
pub use types::{Piece, PieceType};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
