//! Move generation.
//!
//! Pseudo-legal moves come from piece geometry and occupancy alone; legal
//! moves are the pseudo-legal ones that survive [`would_be_in_check`].

mod attacks;
pub mod perft;

use crate::{Board, Position};
use chess_core::{CastleSide, Color, Move, MoveKind, Piece, PieceKind, Square};

pub use attacks::{
    attacked_squares, is_in_check, is_square_attacked, ray_scan, slider_directions,
    would_be_in_check, ALL_DIRECTIONS, DIAGONAL, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

const PLACEHOLDER: Move = Move::quiet(Square::A1, Square::A1);

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [PLACEHOLDER; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Finds the move from `from` to `to`, if present.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.as_slice()
            .iter()
            .find(|m| m.from == from && m.to == to)
            .copied()
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the piece on `from`, whichever color
/// it is.
pub fn pseudo_legal_moves_from(position: &Position, from: Square, moves: &mut MoveList) {
    let Some(piece) = position.board.get(from) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, piece.color, moves),
        PieceKind::Knight => {
            generate_step_moves(&position.board, from, piece.color, &KNIGHT_OFFSETS, moves)
        }
        PieceKind::King => {
            generate_step_moves(&position.board, from, piece.color, &KING_OFFSETS, moves);
            generate_castling_moves(position, piece.color, moves);
        }
        kind => {
            if let Some(directions) = slider_directions(kind) {
                generate_slider_moves(&position.board, from, piece.color, directions, moves);
            }
        }
    }
}

/// Generates the legal moves of the piece on `from`.
pub fn legal_moves_from(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = position.board.get(from) else {
        return moves;
    };
    pseudo_legal_moves_from(position, from, &mut moves);
    moves.retain(|m| !would_be_in_check(position, *m, piece.color));
    moves
}

/// Destination squares the piece on `from` may legally move to.
pub fn legal_targets(position: &Position, from: Square) -> Vec<Square> {
    legal_moves_from(position, from)
        .as_slice()
        .iter()
        .map(|m| m.to)
        .collect()
}

/// Generates all legal moves for the side to move.
pub fn legal_moves(position: &Position) -> MoveList {
    let us = position.side_to_move;
    let mut moves = MoveList::new();
    for (from, _) in position.board.pieces_of(us) {
        pseudo_legal_moves_from(position, from, &mut moves);
    }
    moves.retain(|m| !would_be_in_check(position, *m, us));
    moves
}

/// Returns true if `color` has at least one legal move.
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position.board.pieces_of(color).any(|(from, _)| {
        let mut moves = MoveList::new();
        pseudo_legal_moves_from(position, from, &mut moves);
        moves
            .as_slice()
            .iter()
            .any(|m| !would_be_in_check(position, *m, color))
    })
}

fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let board = &position.board;
    let dir = us.pawn_direction();
    let promotes = |to: Square| to.row() == us.promotion_row();

    if let Some(one) = from.offset(dir, 0).filter(|sq| board.is_empty(*sq)) {
        let kind = if promotes(one) {
            MoveKind::Promotion
        } else {
            MoveKind::Quiet
        };
        moves.push(Move::new(from, one, kind));

        if from.row() == us.pawn_start_row() {
            if let Some(two) = one.offset(dir, 0).filter(|sq| board.is_empty(*sq)) {
                moves.push(Move::new(from, two, MoveKind::DoublePush));
            }
        }
    }

    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color != us => {
                let kind = if promotes(to) {
                    MoveKind::PromotionCapture
                } else {
                    MoveKind::Capture
                };
                moves.push(Move::new(from, to, kind));
            }
            None if position.en_passant == Some(to)
                && en_passant_victim_present(board, from, to, us) =>
            {
                moves.push(Move::new(from, to, MoveKind::EnPassant));
            }
            _ => {}
        }
    }
}

/// The pawn taken en passant stands beside the capturer, on the target's column.
fn en_passant_victim(from: Square, to: Square) -> Option<Square> {
    Square::new(from.row(), to.col())
}

fn en_passant_victim_present(board: &Board, from: Square, to: Square, us: Color) -> bool {
    en_passant_victim(from, to)
        .and_then(|sq| board.get(sq))
        .is_some_and(|p| p.is(us.opposite(), PieceKind::Pawn))
}

fn generate_step_moves(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match board.get(to) {
            None => moves.push(Move::quiet(from, to)),
            Some(p) if p.color != us => moves.push(Move::new(from, to, MoveKind::Capture)),
            Some(_) => {}
        }
    }
}

fn generate_slider_moves(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    ray_scan(board, from, directions, |to, occupant| match occupant {
        None => moves.push(Move::quiet(from, to)),
        Some(p) if p.color != us => moves.push(Move::new(from, to, MoveKind::Capture)),
        Some(_) => {}
    });
}

fn generate_castling_moves(position: &Position, us: Color, moves: &mut MoveList) {
    for side in CastleSide::BOTH {
        if can_castle(position, us, side) {
            let (king_from, king_to) = castle_king_squares(us, side);
            moves.push(Move::new(king_from, king_to, MoveKind::Castle(side)));
        }
    }
}

fn home(color: Color, col: u8) -> Square {
    Square::new(color.home_row(), col).unwrap_or(Square::A1)
}

/// King start and landing squares for castling.
pub fn castle_king_squares(color: Color, side: CastleSide) -> (Square, Square) {
    (home(color, 5), home(color, side.king_target_col()))
}

/// Rook start and landing squares for castling.
pub fn castle_rook_squares(color: Color, side: CastleSide) -> (Square, Square) {
    (home(color, side.rook_col()), home(color, side.rook_target_col()))
}

/// Returns true if `color` may castle on `side` right now.
///
/// Requires that the king and that rook have never moved and still stand on
/// their home squares, that the king is not in check, that every square
/// strictly between them is empty, and that no square the king crosses or
/// lands on is attacked.
pub fn can_castle(position: &Position, color: Color, side: CastleSide) -> bool {
    if !position.can_still_castle(color, side) {
        return false;
    }

    let board = &position.board;
    let (king_from, king_to) = castle_king_squares(color, side);
    let (rook_from, _) = castle_rook_squares(color, side);
    if board.get(king_from) != Some(Piece::new(color, PieceKind::King))
        || board.get(rook_from) != Some(Piece::new(color, PieceKind::Rook))
    {
        return false;
    }

    let them = color.opposite();
    if is_square_attacked(board, king_from, them) {
        return false;
    }

    let (lo, hi) = if rook_from.col() < king_from.col() {
        (rook_from.col() + 1, king_from.col())
    } else {
        (king_from.col() + 1, rook_from.col())
    };
    if (lo..hi).any(|col| !board.is_empty(home(color, col))) {
        return false;
    }

    let (lo, hi) = if king_to.col() < king_from.col() {
        (king_to.col(), king_from.col())
    } else {
        (king_from.col() + 1, king_to.col() + 1)
    };
    !(lo..hi).any(|col| is_square_attacked(board, home(color, col), them))
}

/// What a move removed and relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffects {
    pub moved: Piece,
    pub captured: Option<Piece>,
}

impl MoveEffects {
    /// Pawn moves and captures reset the half-move clock.
    #[inline]
    pub fn resets_halfmove_clock(&self) -> bool {
        self.moved.kind == PieceKind::Pawn || self.captured.is_some()
    }
}

/// Moves the pieces for `m` on a bare board: the mover, an en-passant
/// victim, a castling rook. Returns the captured piece.
///
/// Promotion is not applied; the pawn lands as a pawn.
pub fn apply_to_board(board: &mut Board, m: Move) -> Option<Piece> {
    let piece = board.take(m.from)?;
    let mut captured = board.put(m.to, piece);

    match m.kind {
        MoveKind::EnPassant => {
            if let Some(victim) = en_passant_victim(m.from, m.to) {
                captured = board.take(victim);
            }
        }
        MoveKind::Castle(side) => {
            let (rook_from, rook_to) = castle_rook_squares(piece.color, side);
            if let Some(rook) = board.take(rook_from) {
                board.put(rook_to, rook);
            }
        }
        _ => {}
    }
    captured
}

/// Applies the board part of `m` to the position and updates castling
/// flags and the en-passant target.
///
/// Side to move and clocks are left alone; see [`finish_turn`]. Returns
/// `None` if `from` is empty.
pub fn apply_move_effects(position: &mut Position, m: Move) -> Option<MoveEffects> {
    let moved = position.board.get(m.from)?;
    let captured = apply_to_board(&mut position.board, m);
    let us = moved.color;

    match moved.kind {
        PieceKind::King => position.flags_mut(us).king_moved = true,
        PieceKind::Rook => {
            for side in CastleSide::BOTH {
                if m.from == castle_rook_squares(us, side).0 {
                    position.flags_mut(us).mark_rook_moved(side);
                }
            }
        }
        _ => {}
    }
    if let Some(victim) = captured {
        if victim.kind == PieceKind::Rook {
            for side in CastleSide::BOTH {
                if m.to == castle_rook_squares(victim.color, side).0 {
                    position.flags_mut(victim.color).mark_rook_moved(side);
                }
            }
        }
    }

    position.en_passant = match m.kind {
        MoveKind::DoublePush => m.from.offset(us.pawn_direction(), 0),
        _ => None,
    };

    Some(MoveEffects { moved, captured })
}

/// Replaces the pawn standing on `square` with `kind`.
pub fn apply_promotion(position: &mut Position, square: Square, kind: PieceKind) {
    if let Some(pawn) = position.board.get(square) {
        position.board.put(square, pawn.promoted_to(kind));
    }
}

/// Completes a turn: updates the clocks and hands the move to the other side.
pub fn finish_turn(position: &mut Position, resets_halfmove_clock: bool) {
    if resets_halfmove_clock {
        position.halfmove_clock = 0;
    } else {
        position.halfmove_clock += 1;
    }
    if position.side_to_move == Color::Black {
        position.fullmove_number += 1;
    }
    position.side_to_move = position.side_to_move.opposite();
}

/// Makes a move and returns the new position.
///
/// Promotions use `promotion`, defaulting to a queen.
pub fn make_move(position: &Position, m: Move, promotion: Option<PieceKind>) -> Position {
    let mut next = position.clone();
    let Some(effects) = apply_move_effects(&mut next, m) else {
        return next;
    };
    if m.is_promotion() {
        apply_promotion(&mut next, m.to, promotion.unwrap_or(PieceKind::Queen));
    }
    finish_turn(&mut next, effects.resets_halfmove_clock());
    next
}
