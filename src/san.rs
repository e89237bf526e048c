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

//! Classify moves in Standard Algebraic Notation.
//!
//! Classification only looks at the text. Which square a piece comes from
//! is decided later, against a position, by [`resolve`](crate::resolve).
//!
//! # Examples
//!
//! ```
//! use plyboard::{classify, File, PieceType, Role, Square};
//!
//! let ply = classify(2, "Nbd2")?;
//! assert_eq!(ply.piece, Some(PieceType::Role(Role::Knight)));
//! assert_eq!(ply.to, Some(Square::D2));
//! assert_eq!(ply.disambiguation_file, Some(File::B));
//! assert_eq!(ply.disambiguation_rank, None);
//! # Ok::<_, plyboard::ClassifyError>(())
//! ```

use crate::{
    errors::{ClassifyError, LookupError, ParseError},
    ply::{Ply, PlyFlags},
    File, PieceType, Rank, Role, Square,
};

/// Result tokens that end a game's movetext.
pub const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Classifies the move `token` played at the 0-based `index` of a game.
/// Even indexes are White's moves, odd indexes Black's.
///
/// # Errors
///
/// * [`ParseError`] if the token does not start like a move, or lacks its
///   destination or promotion piece.
/// * [`RangeError`](crate::RangeError) if the destination is not a square name.
/// * [`LookupError`] if the promotion piece is unknown.
///
/// # Examples
///
/// ```
/// use plyboard::{classify, PlyFlags, Square};
///
/// let ply = classify(0, "e4+")?;
/// assert!(ply.flags.contains(PlyFlags::PAWN_MOVE | PlyFlags::CHECK));
/// assert_eq!(ply.raw, "e4");
/// assert_eq!(ply.to, Some(Square::E4));
///
/// assert!(classify(0, "Zf3").is_err());
/// # Ok::<_, plyboard::ClassifyError>(())
/// ```
pub fn classify(index: usize, token: &str) -> Result<Ply, ClassifyError> {
    let mut flags = PlyFlags::empty();
    let mut text = token.trim();
    if let Some(rest) = text.strip_suffix('#') {
        flags |= PlyFlags::CHECK | PlyFlags::CHECKMATE;
        text = rest;
    } else if let Some(rest) = text.strip_suffix('+') {
        flags |= PlyFlags::CHECK;
        text = rest;
    }

    let mut ply = Ply::new(index, text.to_owned());

    if RESULT_TOKENS.contains(&text) {
        ply.flags = flags | PlyFlags::RESULT;
        return Ok(ply);
    }

    if text.contains(['x', 'X']) {
        flags |= PlyFlags::CAPTURE;
    }

    if let Some((head, promotion)) = text.split_once('=') {
        flags |= PlyFlags::PAWN_MOVE | PlyFlags::PROMOTION;
        ply.piece = Some(PieceType::Role(Role::Pawn));
        ply.to = Some(destination(head)?);
        ply.promotion = Some(promotion_role(promotion)?);
    } else if matches!(text, "O-O-O" | "0-0-0") {
        flags |= PlyFlags::QUEENSIDE_CASTLING;
        ply.piece = Some(PieceType::Castling);
    } else if matches!(text, "O-O" | "0-0") {
        flags |= PlyFlags::KINGSIDE_CASTLING;
        ply.piece = Some(PieceType::Castling);
    } else {
        match text.chars().next() {
            Some('a'..='h') => {
                flags |= PlyFlags::PAWN_MOVE | PlyFlags::PIECE_MOVE;
                ply.piece = Some(PieceType::Role(Role::Pawn));
                ply.to = Some(destination(text)?);
            }
            Some(ch @ ('N' | 'B' | 'R' | 'Q' | 'K')) => {
                flags |= PlyFlags::PIECE_MOVE;
                ply.piece = Some(PieceType::from_char(ch)?);
                ply.to = Some(destination(text)?);
                let (rank, file) = disambiguation(text);
                ply.disambiguation_rank = rank;
                ply.disambiguation_file = file;
            }
            _ => return Err(ParseError::InvalidToken.into()),
        }
    }

    ply.flags = flags;
    Ok(ply)
}

/// Reads the destination from the last two characters.
fn destination(text: &str) -> Result<Square, ClassifyError> {
    let bytes = text.as_bytes();
    let start = bytes
        .len()
        .checked_sub(2)
        .ok_or(ParseError::MissingDestination)?;
    Ok(Square::from_ascii(&bytes[start..])?)
}

fn promotion_role(suffix: &str) -> Result<Role, ClassifyError> {
    let ch = suffix.chars().next().ok_or(ParseError::MissingPromotion)?;
    match PieceType::from_char(ch)?.role() {
        Some(role @ (Role::Knight | Role::Bishop | Role::Rook | Role::Queen)) => Ok(role),
        _ => Err(LookupError::Promotion(ch).into()),
    }
}

/// Scans the characters between the piece letter and the destination of a
/// piece move. Only moves that are at least 4 characters long without the
/// capture marker carry hints.
fn disambiguation(text: &str) -> (Option<Rank>, Option<File>) {
    let bytes = text.as_bytes();
    let significant = bytes.iter().filter(|&&b| b != b'x' && b != b'X').count();
    if significant < 4 || bytes.len() < 3 {
        return (None, None);
    }

    let mut rank = None;
    let mut file = None;
    for &b in &bytes[1..bytes.len() - 2] {
        let ch = char::from(b);
        if let Some(r) = Rank::from_char(ch) {
            rank = Some(r);
        } else if let Some(f) = File::from_char(ch) {
            file = Some(f);
        }
    }
    (rank, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::RangeError, CastlingSide, Color};

    #[test]
    fn test_pawn_push_with_check() {
        let ply = classify(0, "e4+").expect("valid move");
        assert_eq!(ply.raw, "e4");
        assert_eq!(ply.color, Color::White);
        assert!(ply.is_pawn_move());
        assert!(ply.is_piece_move());
        assert!(ply.is_check());
        assert!(!ply.is_capture());
        assert_eq!(ply.to, Some(Square::E4));
        assert_eq!(ply.to.map(u8::from), Some(28));
    }

    #[test]
    fn test_piece_with_file_hint() {
        let ply = classify(1, "Nbd2").expect("valid move");
        assert_eq!(ply.color, Color::Black);
        assert_eq!(ply.role(), Some(Role::Knight));
        assert_eq!(ply.to, Some(Square::D2));
        assert_eq!(ply.disambiguation_file, Some(File::B));
        assert_eq!(ply.disambiguation_rank, None);
        assert!(!ply.is_pawn_move());
    }

    #[test]
    fn test_hints() {
        let ply = classify(0, "R1e2").expect("valid move");
        assert_eq!(ply.disambiguation_rank, Some(Rank::First));
        assert_eq!(ply.disambiguation_file, None);

        let ply = classify(0, "Qh4xe1").expect("valid move");
        assert!(ply.is_capture());
        assert_eq!(ply.disambiguation_rank, Some(Rank::Fourth));
        assert_eq!(ply.disambiguation_file, Some(File::H));
        assert_eq!(ply.to, Some(Square::E1));

        // Too short once the capture marker is dropped.
        let ply = classify(0, "Nxf3").expect("valid move");
        assert_eq!(ply.disambiguation_rank, None);
        assert_eq!(ply.disambiguation_file, None);
    }

    #[test]
    fn test_pawn_capture() {
        let ply = classify(2, "exd5").expect("valid move");
        assert!(ply.is_capture());
        assert!(ply.is_pawn_move());
        assert_eq!(ply.to, Some(Square::D5));
        assert_eq!(ply.disambiguation_file, None);
    }

    #[test]
    fn test_promotion() {
        let ply = classify(0, "e8=Q").expect("valid move");
        assert!(ply.is_promotion());
        assert!(ply.is_pawn_move());
        assert!(!ply.is_piece_move());
        assert_eq!(ply.promotion, Some(Role::Queen));
        assert_eq!(ply.to, Some(Square::E8));

        let ply = classify(1, "dxc1=N+").expect("valid move");
        assert!(ply.is_capture());
        assert!(ply.is_check());
        assert_eq!(ply.promotion, Some(Role::Knight));
        assert_eq!(ply.to, Some(Square::C1));
    }

    #[test]
    fn test_bad_promotion() {
        assert_eq!(
            classify(0, "e8="),
            Err(ClassifyError::Parse(ParseError::MissingPromotion))
        );
        assert_eq!(
            classify(0, "e8=K"),
            Err(ClassifyError::Lookup(LookupError::Promotion('K')))
        );
        assert_eq!(
            classify(0, "e8=Z"),
            Err(ClassifyError::Lookup(LookupError::Piece('Z')))
        );
    }

    #[test]
    fn test_castling() {
        let ply = classify(10, "O-O").expect("valid move");
        assert_eq!(ply.castling_side(), Some(CastlingSide::KingSide));
        assert_eq!(ply.piece, Some(PieceType::Castling));
        assert_eq!(ply.to, None);

        let ply = classify(11, "O-O-O+").expect("valid move");
        assert_eq!(ply.castling_side(), Some(CastlingSide::QueenSide));
        assert!(ply.is_check());
    }

    #[test]
    fn test_checkmate() {
        let ply = classify(6, "Qxf7#").expect("valid move");
        assert!(ply.is_check());
        assert!(ply.flags.contains(PlyFlags::CHECKMATE));
        assert_eq!(ply.raw, "Qxf7");
        assert_eq!(ply.to, Some(Square::F7));
    }

    #[test]
    fn test_result_tokens() {
        for token in RESULT_TOKENS {
            let ply = classify(5, token).expect("result token");
            assert!(ply.is_result());
            assert_eq!(ply.piece, None);
            assert_eq!(ply.raw, token);
        }
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            classify(0, "Zf3"),
            Err(ClassifyError::Parse(ParseError::InvalidToken))
        );
        assert_eq!(
            classify(0, ""),
            Err(ClassifyError::Parse(ParseError::InvalidToken))
        );
        assert_eq!(
            classify(0, "K"),
            Err(ClassifyError::Parse(ParseError::MissingDestination))
        );
        assert_eq!(
            classify(0, "Ni3"),
            Err(ClassifyError::Range(RangeError::FileChar('i')))
        );
        assert_eq!(
            classify(0, "e9"),
            Err(ClassifyError::Range(RangeError::RankChar('9')))
        );
    }
}
