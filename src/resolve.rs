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

//! Find the square a classified move starts from.
//!
//! Pieces are searched outward from the destination in a fixed order, and
//! the first square holding a friendly piece of the right role that agrees
//! with the disambiguation hints wins. Nothing here checks legality: a
//! pinned piece is found just like a free one, and sliding pieces are found
//! behind other pieces.

use arrayvec::ArrayVec;

use crate::{
    errors::{LookupError, MoveResolutionError},
    ply::PlyFlags,
    BoardPosition, CastlingSide, Color, File, Ply, Rank, Role, Square,
};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// At most 13 diagonal and 14 orthogonal squares for a queen.
type Candidates = ArrayVec<Square, 27>;

fn push_steps(candidates: &mut Candidates, to: Square, deltas: &[(i8, i8)]) {
    candidates.extend(
        deltas
            .iter()
            .filter_map(|&(delta_rank, delta_file)| to.offset(delta_rank, delta_file)),
    );
}

/// Walks each ray to the edge of the board. Pieces in between are not
/// looked at.
fn push_rays(candidates: &mut Candidates, to: Square, directions: &[(i8, i8)]) {
    for &(delta_rank, delta_file) in directions {
        candidates.extend(
            (1..8).map_while(|distance| to.offset(delta_rank * distance, delta_file * distance)),
        );
    }
}

/// Squares a piece of `role` could move to `to` from, in search order.
fn candidates(role: Role, to: Square) -> Candidates {
    let mut candidates = Candidates::new();
    match role {
        Role::Knight => push_steps(&mut candidates, to, &KNIGHT_DELTAS),
        Role::King => push_steps(&mut candidates, to, &KING_DELTAS),
        Role::Bishop => push_rays(&mut candidates, to, &BISHOP_DIRECTIONS),
        Role::Rook => push_rays(&mut candidates, to, &ROOK_DIRECTIONS),
        Role::Queen => {
            push_rays(&mut candidates, to, &BISHOP_DIRECTIONS);
            push_rays(&mut candidates, to, &ROOK_DIRECTIONS);
        }
        Role::Pawn => (),
    }
    candidates
}

/// A square passes when no hint is given, or when it is on the hinted rank,
/// or on the hinted file.
fn matches_hints(sq: Square, rank: Option<Rank>, file: Option<File>) -> bool {
    (rank.is_none() && file.is_none()) || rank == Some(sq.rank()) || file == Some(sq.file())
}

fn pawn_push_source(
    pos: &BoardPosition,
    color: Color,
    to: Square,
) -> Result<Square, MoveResolutionError> {
    let pawns = pos.by_piece(color.pawn());
    let back = -color.forward();
    [back, 2 * back]
        .into_iter()
        .filter_map(|delta_rank| to.offset(delta_rank, 0))
        .find(|&sq| pawns.contains(sq))
        .ok_or(MoveResolutionError::NoPawn { to })
}

/// The capturing pawn's file is the letter before `x`. Whether a pawn
/// actually stands there is checked when the move is applied.
fn pawn_capture_source(raw: &str, color: Color, to: Square) -> Result<Square, MoveResolutionError> {
    let marker = raw
        .find(['x', 'X'])
        .ok_or(MoveResolutionError::NoCaptureFile)?;
    let ch = raw[..marker]
        .chars()
        .next_back()
        .ok_or(MoveResolutionError::NoCaptureFile)?;
    let file = File::from_char(ch).ok_or(LookupError::File(ch))?;
    let rank = to
        .offset(-color.forward(), 0)
        .ok_or(MoveResolutionError::NoPawn { to })?
        .rank();
    Ok(Square::from_coords(file, rank))
}

/// Finds the source square of `ply` in the position before it is played.
/// Castling starts from the king's square.
///
/// # Errors
///
/// Returns [`MoveResolutionError`] if no square satisfies the move's
/// geometry, occupancy and disambiguation hints.
///
/// # Examples
///
/// ```
/// use plyboard::{classify, resolve_source, BoardPosition, Square};
///
/// let pos = BoardPosition::new();
/// let ply = classify(0, "Nf3")?;
/// assert_eq!(resolve_source(&pos, &ply)?, Square::G1);
///
/// let ply = classify(0, "e4")?;
/// assert_eq!(resolve_source(&pos, &ply)?, Square::E2);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn resolve_source(pos: &BoardPosition, ply: &Ply) -> Result<Square, MoveResolutionError> {
    if ply.castling_side().is_some() {
        return Ok(CastlingSide::king_from(ply.color));
    }

    let to = ply.to.ok_or(MoveResolutionError::NoDestination)?;
    let role = ply.role().ok_or(MoveResolutionError::NoDestination)?;

    if role == Role::Pawn {
        return if ply.is_capture() {
            pawn_capture_source(&ply.raw, ply.color, to)
        } else {
            pawn_push_source(pos, ply.color, to)
        };
    }

    let movers = pos.by_piece(role.of(ply.color));
    candidates(role, to)
        .into_iter()
        .find(|&sq| {
            movers.contains(sq)
                && matches_hints(sq, ply.disambiguation_rank, ply.disambiguation_file)
        })
        .ok_or(MoveResolutionError::NoCandidate { role, to })
}

/// Resolves `ply` against the position before it: sets [`Ply::from`] and
/// marks pawn captures onto an empty square of the en passant rank as
/// [`PlyFlags::EN_PASSANT`]. Result plies are left as they are.
///
/// # Errors
///
/// See [`resolve_source()`].
pub fn resolve(pos: &BoardPosition, ply: &mut Ply) -> Result<(), MoveResolutionError> {
    if ply.is_result() {
        return Ok(());
    }

    let from = resolve_source(pos, ply)?;
    ply.from = Some(from);

    if let Some(to) = ply.to {
        let en_passant_rank = ply.color.fold_wb(Rank::Sixth, Rank::Third);
        if ply.is_pawn_move()
            && ply.is_capture()
            && !ply.is_promotion()
            && to.rank() == en_passant_rank
            && pos.piece_at(to).is_none()
        {
            ply.flags |= PlyFlags::EN_PASSANT;
        }
    }

    Ok(())
}
