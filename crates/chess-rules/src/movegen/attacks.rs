//! Attack detection: which squares a color's pieces hit right now.

use crate::{Board, Position};
use chess_core::{Color, Move, Piece, PieceKind, Square};

use super::apply_to_board;

/// Rook directions as (row delta, column delta).
pub const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop directions as (row delta, column delta).
pub const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Queen directions.
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = ALL_DIRECTIONS;

/// Direction set a sliding piece moves along, or `None` for non-sliders.
pub fn slider_directions(kind: PieceKind) -> Option<&'static [(i8, i8)]> {
    match kind {
        PieceKind::Bishop => Some(&DIAGONAL),
        PieceKind::Rook => Some(&ORTHOGONAL),
        PieceKind::Queen => Some(&ALL_DIRECTIONS),
        _ => None,
    }
}

/// Walks each direction from `from` until the board edge or the first
/// occupied square, calling `visit` for every square reached.
///
/// The occupied square that ends a ray is visited too, whatever its color.
pub fn ray_scan<F>(board: &Board, from: Square, directions: &[(i8, i8)], mut visit: F)
where
    F: FnMut(Square, Option<Piece>),
{
    for &(dr, dc) in directions {
        let mut cursor = from.offset(dr, dc);
        while let Some(sq) = cursor {
            let occupant = board.get(sq);
            visit(sq, occupant);
            if occupant.is_some() {
                break;
            }
            cursor = sq.offset(dr, dc);
        }
    }
}

/// Returns true if any piece of `by` could move onto `sq` in one step.
///
/// Pure geometry and occupancy: pawns hit their forward diagonals whether
/// or not anything stands there, and nothing checks the attacker's own
/// king safety.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let hits = |offsets: &[(i8, i8)], kind: PieceKind| {
        offsets.iter().any(|&(dr, dc)| {
            sq.offset(dr, dc)
                .and_then(|from| board.get(from))
                .is_some_and(|p| p.is(by, kind))
        })
    };

    // A pawn of `by` attacking sq stands one row behind it, from `by`'s view.
    let behind = -by.pawn_direction();
    if hits(&[(behind, -1), (behind, 1)][..], PieceKind::Pawn) {
        return true;
    }
    if hits(&KNIGHT_OFFSETS[..], PieceKind::Knight) || hits(&KING_OFFSETS[..], PieceKind::King) {
        return true;
    }

    let mut attacked = false;
    ray_scan(board, sq, &ORTHOGONAL, |_, occupant| {
        if let Some(p) = occupant {
            attacked |= p.color == by && matches!(p.kind, PieceKind::Rook | PieceKind::Queen);
        }
    });
    if attacked {
        return true;
    }
    ray_scan(board, sq, &DIAGONAL, |_, occupant| {
        if let Some(p) = occupant {
            attacked |= p.color == by && matches!(p.kind, PieceKind::Bishop | PieceKind::Queen);
        }
    });
    attacked
}

/// Returns true if the king of `color` is attacked.
///
/// A board without that king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// Returns true if playing `m` would leave the king of `color` attacked.
///
/// The whole move is simulated on a scratch board, including removal of an
/// en-passant victim and the rook hop of castling; the position itself is
/// not touched.
pub fn would_be_in_check(position: &Position, m: Move, color: Color) -> bool {
    let mut scratch = position.board.clone();
    apply_to_board(&mut scratch, m);
    is_in_check(&scratch, color)
}

/// Every square a piece on `from` attacks, in the sense of
/// [`is_square_attacked`].
pub fn attacked_squares(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let mut squares = Vec::new();
    let steps = |offsets: &[(i8, i8)], out: &mut Vec<Square>| {
        out.extend(offsets.iter().filter_map(|&(dr, dc)| from.offset(dr, dc)));
    };
    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            steps(&[(dir, -1), (dir, 1)][..], &mut squares);
        }
        PieceKind::Knight => steps(&KNIGHT_OFFSETS[..], &mut squares),
        PieceKind::King => steps(&KING_OFFSETS[..], &mut squares),
        kind => {
            if let Some(dirs) = slider_directions(kind) {
                ray_scan(board, from, dirs, |sq, _| squares.push(sq));
            }
        }
    }
    squares
}
