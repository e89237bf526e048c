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

use bitflags::bitflags;

use crate::{CastlingSide, Color, File, PieceType, Rank, Role, Square};

bitflags! {
    /// What a ply's notation says about the move.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct PlyFlags: u16 {
        const PAWN_MOVE = 1 << 0;
        const PIECE_MOVE = 1 << 1;
        const CAPTURE = 1 << 2;
        const PROMOTION = 1 << 3;
        const CHECK = 1 << 4;
        const CHECKMATE = 1 << 5;
        const EN_PASSANT = 1 << 6;
        const KINGSIDE_CASTLING = 1 << 7;
        const QUEENSIDE_CASTLING = 1 << 8;
        /// `1-0`, `0-1`, `1/2-1/2` or `*`.
        const RESULT = 1 << 9;
    }
}

/// One half-move.
///
/// Built by [`classify`](crate::classify) from its notation. Resolution
/// against a position fills in [`Ply::from`] and, for en passant captures,
/// [`PlyFlags::EN_PASSANT`]. After that the ply is only read.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Ply {
    /// 0-based position in the game.
    pub index: usize,
    pub move_number: u32,
    /// The notation without its check or checkmate suffix.
    pub raw: String,
    pub color: Color,
    pub flags: PlyFlags,
    /// `None` for result plies.
    pub piece: Option<PieceType>,
    pub to: Option<Square>,
    pub promotion: Option<Role>,
    pub disambiguation_rank: Option<Rank>,
    pub disambiguation_file: Option<File>,
    pub from: Option<Square>,
}

impl Ply {
    pub(crate) fn new(index: usize, raw: String) -> Ply {
        Ply {
            index,
            move_number: move_number(index),
            raw,
            color: Color::from_ply_index(index),
            flags: PlyFlags::empty(),
            piece: None,
            to: None,
            promotion: None,
            disambiguation_rank: None,
            disambiguation_file: None,
            from: None,
        }
    }

    #[inline]
    pub fn is_pawn_move(&self) -> bool {
        self.flags.contains(PlyFlags::PAWN_MOVE)
    }

    #[inline]
    pub fn is_piece_move(&self) -> bool {
        self.flags.contains(PlyFlags::PIECE_MOVE)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.flags.contains(PlyFlags::CAPTURE)
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.flags.contains(PlyFlags::PROMOTION)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.flags.contains(PlyFlags::CHECK)
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(PlyFlags::EN_PASSANT)
    }

    #[inline]
    pub fn is_result(&self) -> bool {
        self.flags.contains(PlyFlags::RESULT)
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        if self.flags.contains(PlyFlags::KINGSIDE_CASTLING) {
            Some(CastlingSide::KingSide)
        } else if self.flags.contains(PlyFlags::QUEENSIDE_CASTLING) {
            Some(CastlingSide::QueenSide)
        } else {
            None
        }
    }

    /// The board role that moves, `None` for castling and result plies.
    pub fn role(&self) -> Option<Role> {
        self.piece.and_then(PieceType::role)
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.move_number,
            self.color.fold_wb(".", "..."),
            self.raw
        )
    }
}

/// Full move number of a 0-based ply index.
#[inline]
pub(crate) fn move_number(index: usize) -> u32 {
    u32::try_from(index / 2 + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_number() {
        assert_eq!(move_number(0), 1);
        assert_eq!(move_number(1), 1);
        assert_eq!(move_number(2), 2);
        assert_eq!(move_number(9), 5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Ply::new(0, "e4".to_owned()).to_string(), "1. e4");
        assert_eq!(Ply::new(3, "Nf6".to_owned()).to_string(), "2... Nf6");
    }
}
