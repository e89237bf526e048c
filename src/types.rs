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

use std::fmt;

use crate::{color::Color, errors::LookupError, role::Role};

/// A piece with [`Color`] and [`Role`]. Each of the 12 pieces keys one mask
/// of a [`BoardPosition`](crate::BoardPosition).
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn char(self) -> char {
        self.color.fold_wb(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.color, self.role)
    }
}

/// Entry of the piece table: what acts in a ply.
///
/// Besides the six board roles there is the `Castling` marker, which tags
/// `O-O` and `O-O-O` plies and never appears on the board.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PieceType {
    Role(Role),
    Castling,
}

impl PieceType {
    /// Looks up the piece table.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Piece`] for a letter other than `P`, `N`, `B`,
    /// `R`, `Q`, `K` and `C`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{PieceType, Role};
    ///
    /// assert_eq!(PieceType::from_char('N')?, PieceType::Role(Role::Knight));
    /// assert_eq!(PieceType::from_char('C')?, PieceType::Castling);
    /// assert!(PieceType::from_char('X').is_err());
    /// # Ok::<_, plyboard::LookupError>(())
    /// ```
    pub const fn from_char(ch: char) -> Result<PieceType, LookupError> {
        Ok(match ch {
            'P' => PieceType::Role(Role::Pawn),
            'N' => PieceType::Role(Role::Knight),
            'B' => PieceType::Role(Role::Bishop),
            'R' => PieceType::Role(Role::Rook),
            'Q' => PieceType::Role(Role::Queen),
            'K' => PieceType::Role(Role::King),
            'C' => PieceType::Castling,
            _ => return Err(LookupError::Piece(ch)),
        })
    }

    pub const fn name(self) -> char {
        match self {
            PieceType::Role(role) => role.upper_char(),
            PieceType::Castling => 'C',
        }
    }

    pub const fn value(self) -> u32 {
        match self {
            PieceType::Role(role) => role.value(),
            PieceType::Castling => 0,
        }
    }

    pub const fn role(self) -> Option<Role> {
        match self {
            PieceType::Role(role) => Some(role),
            PieceType::Castling => None,
        }
    }

    /// The whole piece table, in `P`, `N`, `B`, `R`, `Q`, `K`, `C` order.
    pub const TABLE: [PieceType; 7] = [
        PieceType::Role(Role::Pawn),
        PieceType::Role(Role::Knight),
        PieceType::Role(Role::Bishop),
        PieceType::Role(Role::Rook),
        PieceType::Role(Role::Queen),
        PieceType::Role(Role::King),
        PieceType::Castling,
    ];
}

impl From<Role> for PieceType {
    fn from(role: Role) -> PieceType {
        PieceType::Role(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_table() {
        for entry in PieceType::TABLE {
            assert_eq!(PieceType::from_char(entry.name()), Ok(entry));
        }
        assert_eq!(PieceType::from_char('n'), Err(LookupError::Piece('n')));
        assert_eq!(PieceType::Castling.role(), None);
        assert_eq!(PieceType::from(Role::Queen).value(), 9);
    }

    #[test]
    fn test_piece_char() {
        assert_eq!(Piece::from_char('Q'), Some(Role::Queen.of(Color::White)));
        assert_eq!(Piece::from_char('k'), Some(Role::King.of(Color::Black)));
        assert_eq!(Role::Knight.of(Color::Black).char(), 'n');
        assert_eq!(Piece::from_char('x'), None);
    }
}
