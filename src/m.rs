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

use std::fmt::{self, Display, Write as _};

use crate::{
    errors::{MoveApplicationError, ParseError, PlyError},
    BoardPosition, CastlingSide, Color, Piece, Ply, Role, Square,
};

/// A resolved move, ready to be played on a [`BoardPosition`].
///
/// # Display
///
/// `Move` implements [`Display`] using long algebraic notation.
///
/// ```
/// use plyboard::{Move, Role, Square};
///
/// let m = Move::Normal {
///     role: Role::Knight,
///     from: Square::G1,
///     to: Square::F3,
///     capture: false,
/// };
/// assert_eq!(m.to_string(), "Ng1-f3");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    /// A move without promotion, e.g., `Bd3xh7`.
    Normal {
        role: Role,
        from: Square,
        to: Square,
        capture: bool,
    },
    /// A pawn move to the last rank, e.g., `e7-e8=Q`.
    Promotion {
        from: Square,
        to: Square,
        capture: bool,
        promotion: Role,
    },
    /// An en passant capture, e.g., `e5xd6`.
    EnPassant { from: Square, to: Square },
    /// `O-O` or `O-O-O`.
    Castle(CastlingSide),
    /// A result token. Playing it leaves the position unchanged.
    Null,
}

impl Move {
    /// Builds the move described by a resolved ply.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnrecognizedMoveType`] if the ply's flags and
    /// squares do not describe one of the move kinds, for example if it was
    /// never resolved.
    pub fn from_ply(ply: &Ply) -> Result<Move, ParseError> {
        if ply.is_result() {
            return Ok(Move::Null);
        }
        if let Some(side) = ply.castling_side() {
            return Ok(Move::Castle(side));
        }

        let (Some(role), Some(from), Some(to)) = (ply.role(), ply.from, ply.to) else {
            return Err(ParseError::UnrecognizedMoveType);
        };

        if ply.is_promotion() {
            match ply.promotion {
                Some(promotion) if role == Role::Pawn => Ok(Move::Promotion {
                    from,
                    to,
                    capture: ply.is_capture(),
                    promotion,
                }),
                _ => Err(ParseError::UnrecognizedMoveType),
            }
        } else if ply.is_en_passant() {
            Ok(Move::EnPassant { from, to })
        } else if ply.is_pawn_move() || ply.is_piece_move() {
            Ok(Move::Normal {
                role,
                from,
                to,
                capture: ply.is_capture(),
            })
        } else {
            Err(ParseError::UnrecognizedMoveType)
        }
    }

    /// Gets the role of the moved piece, `None` for [`Move::Null`].
    pub const fn role(self) -> Option<Role> {
        match self {
            Move::Normal { role, .. } => Some(role),
            Move::Promotion { .. } | Move::EnPassant { .. } => Some(Role::Pawn),
            Move::Castle(_) => Some(Role::King),
            Move::Null => None,
        }
    }

    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            Move::Normal { capture: true, .. }
                | Move::Promotion { capture: true, .. }
                | Move::EnPassant { .. }
        )
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = |capture: bool| if capture { 'x' } else { '-' };
        match *self {
            Move::Normal {
                role,
                from,
                to,
                capture,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }
                write!(f, "{}{}{}", from, marker(capture), to)
            }
            Move::Promotion {
                from,
                to,
                capture,
                promotion,
            } => write!(
                f,
                "{}{}{}={}",
                from,
                marker(capture),
                to,
                promotion.upper_char()
            ),
            Move::EnPassant { from, to } => write!(f, "{from}x{to}"),
            Move::Castle(side) => f.write_str(if side.is_king_side() { "O-O" } else { "O-O-O" }),
            Move::Null => f.write_str("--"),
        }
    }
}

impl BoardPosition {
    /// Plays `m` for `color` and returns the resulting position. `self` is
    /// left untouched.
    ///
    /// Only the occupancy the move needs is checked: captures need an
    /// opposing piece on the destination, other moves an empty one, and the
    /// moving pieces must stand on their source squares.
    ///
    /// Castling fails with [`MoveApplicationError::MissingMover`] when the
    /// king or the rook is not on its home square, and with
    /// [`MoveApplicationError::DestinationOccupied`] when the king's or the
    /// rook's target square is taken.
    ///
    /// # Errors
    ///
    /// Returns [`MoveApplicationError`] if the board does not have that
    /// shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::{BoardPosition, Color, Move, Role, Square};
    ///
    /// let pos = BoardPosition::new();
    /// let after = pos.play(Color::White, &Move::Normal {
    ///     role: Role::Pawn,
    ///     from: Square::E2,
    ///     to: Square::E4,
    ///     capture: false,
    /// })?;
    /// assert_eq!(after.piece_at(Square::E4), Some(Color::White.pawn()));
    /// assert_eq!(pos.piece_at(Square::E4), None);
    /// # Ok::<_, plyboard::MoveApplicationError>(())
    /// ```
    pub fn play(&self, color: Color, m: &Move) -> Result<BoardPosition, MoveApplicationError> {
        let mut next = *self;
        match *m {
            Move::Normal {
                role,
                from,
                to,
                capture,
            } => {
                next.clear_destination(color, to, capture)?;
                next.relocate(role.of(color), from, to)?;
            }
            Move::Promotion {
                from,
                to,
                capture,
                promotion,
            } => {
                next.clear_destination(color, to, capture)?;
                next.lift(color.pawn(), from)?;
                next.by_piece_mut(promotion.of(color)).add(to);
            }
            Move::EnPassant { from, to } => {
                let captured = to
                    .offset(-color.forward(), 0)
                    .ok_or(MoveApplicationError::NoEnPassantPawn { at: to })?;
                if !next.by_piece(color.other().pawn()).contains(captured) {
                    return Err(MoveApplicationError::NoEnPassantPawn { at: captured });
                }
                next.clear_destination(color, to, false)?;
                next.by_piece_mut(color.other().pawn()).remove(captured);
                next.relocate(color.pawn(), from, to)?;
            }
            Move::Castle(side) => {
                let king_to = side.king_to(color);
                let rook_to = side.rook_to(color);
                next.lift(color.king(), CastlingSide::king_from(color))?;
                next.lift(color.rook(), side.rook_from(color))?;
                next.clear_destination(color, king_to, false)?;
                next.clear_destination(color, rook_to, false)?;
                next.by_piece_mut(color.king()).add(king_to);
                next.by_piece_mut(color.rook()).add(rook_to);
            }
            Move::Null => (),
        }
        Ok(next)
    }

    /// Makes room on `to`. A capture removes the opposing piece from exactly
    /// the mask that holds it.
    fn clear_destination(
        &mut self,
        color: Color,
        to: Square,
        capture: bool,
    ) -> Result<(), MoveApplicationError> {
        match (self.piece_at(to), capture) {
            (Some(occupant), true) if occupant.color != color => {
                self.by_piece_mut(occupant).remove(to);
                Ok(())
            }
            (_, true) => Err(MoveApplicationError::NoOpposingPiece { at: to }),
            (None, false) => Ok(()),
            (Some(_), false) => Err(MoveApplicationError::DestinationOccupied { at: to }),
        }
    }

    fn lift(&mut self, piece: Piece, from: Square) -> Result<(), MoveApplicationError> {
        let mask = self.by_piece_mut(piece);
        if !mask.contains(from) {
            return Err(MoveApplicationError::MissingMover {
                role: piece.role,
                at: from,
            });
        }
        mask.remove(from);
        Ok(())
    }

    fn relocate(
        &mut self,
        piece: Piece,
        from: Square,
        to: Square,
    ) -> Result<(), MoveApplicationError> {
        let mask = self.by_piece_mut(piece);
        if !mask.contains(from) {
            return Err(MoveApplicationError::MissingMover {
                role: piece.role,
                at: from,
            });
        }
        *mask = mask.moved(from, to);
        Ok(())
    }
}

/// Applies a resolved ply to the position before it.
///
/// # Errors
///
/// Returns [`PlyError::Parse`] if the ply does not describe a known kind of
/// move, or [`PlyError::Application`] if the board does not fit it.
///
/// # Examples
///
/// ```
/// use plyboard::{apply, classify, resolve, BoardPosition, Square};
///
/// let pos = BoardPosition::new();
/// let mut ply = classify(0, "Nf3")?;
/// resolve(&pos, &mut ply)?;
/// let after = apply(&pos, &ply)?;
/// assert_eq!(after.board_fen(), "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn apply(previous: &BoardPosition, ply: &Ply) -> Result<BoardPosition, PlyError> {
    let m = Move::from_ply(ply)?;
    Ok(previous.play(ply.color, &m)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, resolve, Bitboard};

    fn step(pos: &BoardPosition, index: usize, san: &str) -> Result<BoardPosition, PlyError> {
        let mut ply = classify(index, san)?;
        resolve(pos, &mut ply)?;
        apply(pos, &ply)
    }

    fn all_pieces() -> impl Iterator<Item = Piece> {
        Color::ALL
            .into_iter()
            .flat_map(|color| Role::ALL.into_iter().map(move |role| role.of(color)))
    }

    #[test]
    fn test_pawn_push_touches_one_mask() {
        let pos = BoardPosition::new();
        let after = step(&pos, 0, "e4").expect("legal move");
        let pawns = after.by_piece(Color::White.pawn());
        assert!(!pawns.contains(Square::E2));
        assert!(pawns.contains(Square::E4));
        assert_eq!(u64::from(pawns), (0xff00 & !(1 << 12)) | (1 << 28));
        for piece in all_pieces().filter(|&p| p != Color::White.pawn()) {
            assert_eq!(after.by_piece(piece), pos.by_piece(piece), "{piece:?}");
        }
        assert_eq!(pos, BoardPosition::new());
    }

    #[test]
    fn test_capture() {
        let mut pos = BoardPosition::new();
        for (index, san) in ["e4", "d5"].into_iter().enumerate() {
            pos = step(&pos, index, san).expect("legal move");
        }
        let after = step(&pos, 2, "exd5").expect("legal move");
        assert_eq!(after.piece_at(Square::D5), Some(Color::White.pawn()));
        assert_eq!(after.by_piece(Color::Black.pawn()).count(), 7);
        assert!(after.is_consistent());
    }

    #[test]
    fn test_capture_errors() {
        let pos = BoardPosition::new();
        assert_eq!(
            step(&pos, 0, "exd3"),
            Err(PlyError::Application(MoveApplicationError::NoOpposingPiece {
                at: Square::D3
            }))
        );
        // The knight on b1 is found, but d2 holds a friendly pawn.
        assert_eq!(
            step(&pos, 0, "Nxd2"),
            Err(PlyError::Application(MoveApplicationError::NoOpposingPiece {
                at: Square::D2
            }))
        );
    }

    #[test]
    fn test_destination_occupied() {
        let m = Move::Normal {
            role: Role::Rook,
            from: Square::A1,
            to: Square::A2,
            capture: false,
        };
        assert_eq!(
            BoardPosition::new().play(Color::White, &m),
            Err(MoveApplicationError::DestinationOccupied { at: Square::A2 })
        );
    }

    #[test]
    fn test_missing_mover() {
        let m = Move::Normal {
            role: Role::Queen,
            from: Square::D4,
            to: Square::D5,
            capture: false,
        };
        assert_eq!(
            BoardPosition::new().play(Color::White, &m),
            Err(MoveApplicationError::MissingMover {
                role: Role::Queen,
                at: Square::D4
            })
        );
    }

    #[test]
    fn test_promotion() {
        let pos = BoardPosition::empty()
            .with_piece(Square::E7, Color::White.pawn())
            .with_piece(Square::D8, Role::Rook.of(Color::Black));

        let after = step(&pos, 0, "e8=Q").expect("legal move");
        assert_eq!(after.piece_at(Square::E8), Some(Role::Queen.of(Color::White)));
        assert!(after.by_piece(Color::White.pawn()).is_empty());

        let after = step(&pos, 0, "exd8=N+").expect("legal move");
        assert_eq!(after.piece_at(Square::D8), Some(Role::Knight.of(Color::White)));
        assert!(after.by_piece(Role::Rook.of(Color::Black)).is_empty());
        assert_eq!(after.occupied().count(), 1);
    }

    #[test]
    fn test_en_passant() {
        let pos = BoardPosition::empty()
            .with_piece(Square::E5, Color::White.pawn())
            .with_piece(Square::D5, Color::Black.pawn());
        let after = step(&pos, 4, "exd6").expect("en passant");
        assert_eq!(after.by_piece(Color::White.pawn()), Bitboard::from_square(Square::D6));
        assert!(after.by_piece(Color::Black.pawn()).is_empty());

        let pos = BoardPosition::empty()
            .with_piece(Square::D4, Color::Black.pawn())
            .with_piece(Square::E4, Color::White.pawn());
        let after = step(&pos, 5, "dxe3").expect("en passant");
        assert_eq!(after.by_piece(Color::Black.pawn()), Bitboard::from_square(Square::E3));
        assert!(after.by_piece(Color::White.pawn()).is_empty());
    }

    #[test]
    fn test_en_passant_without_pawn() {
        let pos = BoardPosition::empty().with_piece(Square::E5, Color::White.pawn());
        assert_eq!(
            step(&pos, 4, "exd6"),
            Err(PlyError::Application(MoveApplicationError::NoEnPassantPawn {
                at: Square::D5
            }))
        );
    }

    #[test]
    fn test_castling() {
        let pos = BoardPosition::empty()
            .with_piece(Square::E1, Color::White.king())
            .with_piece(Square::H1, Color::White.rook())
            .with_piece(Square::A1, Color::White.rook())
            .with_piece(Square::E8, Color::Black.king())
            .with_piece(Square::A8, Color::Black.rook());

        let after = step(&pos, 0, "O-O").expect("castles");
        assert_eq!(after.board_fen(), "r3k3/8/8/8/8/8/8/R4RK1");

        let after = step(&after, 1, "O-O-O").expect("castles");
        assert_eq!(after.board_fen(), "2kr4/8/8/8/8/8/8/R4RK1");
    }

    #[test]
    fn test_castling_needs_pieces() {
        let pos = BoardPosition::new();
        assert_eq!(
            pos.play(Color::White, &Move::Castle(CastlingSide::KingSide)),
            Err(MoveApplicationError::DestinationOccupied { at: Square::G1 })
        );
        let pos = BoardPosition::empty().with_piece(Square::E1, Color::White.king());
        assert_eq!(
            pos.play(Color::White, &Move::Castle(CastlingSide::QueenSide)),
            Err(MoveApplicationError::MissingMover {
                role: Role::Rook,
                at: Square::A1
            })
        );
        let pos = BoardPosition::empty()
            .with_piece(Square::E2, Color::White.king())
            .with_piece(Square::H1, Color::White.rook());
        assert_eq!(
            pos.play(Color::White, &Move::Castle(CastlingSide::KingSide)),
            Err(MoveApplicationError::MissingMover {
                role: Role::King,
                at: Square::E1
            })
        );
    }

    #[test]
    fn test_result_is_a_copy() {
        let pos = BoardPosition::new();
        assert_eq!(step(&pos, 0, "1/2-1/2"), Ok(pos));
    }

    #[test]
    fn test_unresolved_ply() {
        let ply = classify(0, "Nf3").expect("valid move");
        assert_eq!(Move::from_ply(&ply), Err(ParseError::UnrecognizedMoveType));
        assert_eq!(
            apply(&BoardPosition::new(), &ply),
            Err(PlyError::Parse(ParseError::UnrecognizedMoveType))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Move::Promotion {
                from: Square::E7,
                to: Square::D8,
                capture: true,
                promotion: Role::Queen
            }
            .to_string(),
            "e7xd8=Q"
        );
        assert_eq!(Move::Castle(CastlingSide::QueenSide).to_string(), "O-O-O");
        assert_eq!(Move::Null.to_string(), "--");
    }
}
