//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Each promotion counts once per choice of piece.

use super::{legal_moves, make_move};
use crate::Position;
use chess_core::{Move, PieceKind};

const PROMOTION_CHOICES: [Option<PieceKind>; 4] = [
    Some(PieceKind::Queen),
    Some(PieceKind::Rook),
    Some(PieceKind::Bishop),
    Some(PieceKind::Knight),
];

fn choices(m: Move) -> &'static [Option<PieceKind>] {
    if m.is_promotion() {
        &PROMOTION_CHOICES
    } else {
        &[None]
    }
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);

    let mut nodes = 0u64;
    for m in &moves {
        for &promotion in choices(*m) {
            nodes += if depth == 1 {
                1
            } else {
                perft(&make_move(position, *m, promotion), depth - 1)
            };
        }
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = legal_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        for &promotion in choices(*m) {
            let nodes = if depth > 1 {
                perft(&make_move(position, *m, promotion), depth - 1)
            } else {
                1
            };
            let mut name = m.to_uci();
            if let Some(kind) = promotion {
                name.push(kind.letter());
            }
            results.push((name, nodes));
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
