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

use std::fmt::{self, Write as _};

use crate::{
    bitboard::Bitboard,
    color::{ByColor, Color},
    errors::{LookupError, RangeError},
    role::{ByRole, Role},
    square::{square_from_rank_file, File, Rank, Square},
    types::Piece,
};

/// Piece placement: one occupancy mask for each of the 12 [pieces](Piece).
///
/// A position is a plain value. Deriving the next position copies the
/// previous one and changes the copy, so every snapshot in a game's history
/// stays valid on its own.
///
/// No square is set in more than one mask. Positions built by this crate
/// keep that invariant; [`BoardPosition::is_consistent()`] checks it.
///
/// # Examples
///
/// ```
/// use plyboard::{BoardPosition, Color, Role};
///
/// let pos = BoardPosition::new();
/// assert_eq!(pos.by_piece(Role::Knight.of(Color::White)).count(), 2);
/// assert!(pos.is_consistent());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct BoardPosition {
    masks: ByColor<ByRole<Bitboard>>,
}

impl BoardPosition {
    /// The standard starting position.
    pub const fn new() -> BoardPosition {
        BoardPosition {
            masks: ByColor {
                white: ByRole {
                    pawn: Bitboard(0x0000_0000_0000_ff00),
                    knight: Bitboard(0x0000_0000_0000_0042),
                    bishop: Bitboard(0x0000_0000_0000_0024),
                    rook: Bitboard(0x0000_0000_0000_0081),
                    queen: Bitboard(0x0000_0000_0000_0008),
                    king: Bitboard(0x0000_0000_0000_0010),
                },
                black: ByRole {
                    pawn: Bitboard(0x00ff_0000_0000_0000),
                    knight: Bitboard(0x4200_0000_0000_0000),
                    bishop: Bitboard(0x2400_0000_0000_0000),
                    rook: Bitboard(0x8100_0000_0000_0000),
                    queen: Bitboard(0x0800_0000_0000_0000),
                    king: Bitboard(0x1000_0000_0000_0000),
                },
            },
        }
    }

    /// A board without any pieces.
    pub const fn empty() -> BoardPosition {
        BoardPosition {
            masks: ByColor {
                white: ByRole {
                    pawn: Bitboard::EMPTY,
                    knight: Bitboard::EMPTY,
                    bishop: Bitboard::EMPTY,
                    rook: Bitboard::EMPTY,
                    queen: Bitboard::EMPTY,
                    king: Bitboard::EMPTY,
                },
                black: ByRole {
                    pawn: Bitboard::EMPTY,
                    knight: Bitboard::EMPTY,
                    bishop: Bitboard::EMPTY,
                    rook: Bitboard::EMPTY,
                    queen: Bitboard::EMPTY,
                    king: Bitboard::EMPTY,
                },
            },
        }
    }

    /// The position with `piece` added on `sq`, replacing whatever stood
    /// there.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{BoardPosition, Color, Role, Square};
    ///
    /// let pos = BoardPosition::empty()
    ///     .with_piece(Square::E1, Role::King.of(Color::White))
    ///     .with_piece(Square::E8, Role::King.of(Color::Black));
    /// assert_eq!(pos.occupied().count(), 2);
    /// ```
    #[must_use]
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> BoardPosition {
        self.discard_piece_at(sq);
        self.by_piece_mut(piece).add(sq);
        self
    }

    #[inline]
    pub const fn by_piece(&self, piece: Piece) -> Bitboard {
        *self.masks.get(piece.color).get(piece.role)
    }

    #[inline]
    pub(crate) fn by_piece_mut(&mut self, piece: Piece) -> &mut Bitboard {
        self.masks.get_mut(piece.color).get_mut(piece.role)
    }

    /// Gets a mask by its FEN letter, `P` to `K` for White and `p` to `k`
    /// for Black.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::BoardKey`] for any other character.
    pub fn by_key(&self, key: char) -> Result<Bitboard, LookupError> {
        Piece::from_char(key)
            .map(|piece| self.by_piece(piece))
            .ok_or(LookupError::BoardKey(key))
    }

    pub fn by_color(&self, color: Color) -> Bitboard {
        (*self.masks.get(color))
            .into_iter()
            .fold(Bitboard::EMPTY, |acc, mask| acc | mask)
    }

    pub fn occupied(&self) -> Bitboard {
        self.by_color(Color::White) | self.by_color(Color::Black)
    }

    /// Finds the piece on `sq` by probing all 12 masks.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Color::ALL.into_iter().find_map(|color| {
            self.masks
                .get(color)
                .find(|mask| mask.contains(sq))
                .map(|role| role.of(color))
        })
    }

    /// Tests whether `piece` stands on (`rank`, `file`).
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if `rank` or `file` is not in `0..=7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{BoardPosition, Color, Role};
    ///
    /// let pos = BoardPosition::new();
    /// assert!(pos.read_square(Role::King.of(Color::White), 0, 4)?);
    /// assert!(!pos.read_square(Role::King.of(Color::White), 0, 3)?);
    /// assert!(pos.read_square(Role::King.of(Color::White), 0, 8).is_err());
    /// # Ok::<_, plyboard::RangeError>(())
    /// ```
    pub fn read_square(&self, piece: Piece, rank: i64, file: i64) -> Result<bool, RangeError> {
        let sq = square_from_rank_file(rank, file)?;
        Ok(self.by_piece(piece).contains(sq))
    }

    /// Removes any piece on `sq`.
    pub(crate) fn discard_piece_at(&mut self, sq: Square) {
        for color in Color::ALL {
            for role in Role::ALL {
                self.by_piece_mut(role.of(color)).remove(sq);
            }
        }
    }

    /// Checks that no square is set in two masks.
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::ALL {
            for mask in *self.masks.get(color) {
                if !seen.is_disjoint(mask) {
                    return false;
                }
                seen |= mask;
            }
        }
        true
    }

    /// Sum of the material values of one side.
    pub fn material(&self, color: Color) -> u32 {
        (*self.masks.get(color))
            .zip_role()
            .into_iter()
            .map(|(role, mask)| role.value() * mask.count() as u32)
            .sum()
    }

    /// The piece placement field of FEN, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR` for the starting
    /// position.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(64 + 7);
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > Rank::First {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for BoardPosition {
    fn default() -> BoardPosition {
        BoardPosition::new()
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoardPosition")
            .field(&self.board_fen())
            .finish()
    }
}
