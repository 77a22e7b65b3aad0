use crate::Board;
use chess_core::{PieceKind, Square};

/// Returns true if neither side can possibly deliver mate.
///
/// Covers king against king, king and a single minor piece against king, and
/// any number of bishops all standing on squares of one color with nothing
/// else on the board.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut knights = 0u32;
    let mut bishop_squares: Vec<Square> = Vec::new();

    for (sq, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight => knights += 1,
            PieceKind::Bishop => bishop_squares.push(sq),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match (knights, bishop_squares.as_slice()) {
        (0 | 1, []) => true,
        (0, [first, rest @ ..]) => rest.iter().all(|sq| sq.is_light() == first.is_light()),
        _ => false,
    }
}

/// How many times `hash` occurs in `history`.
#[inline]
pub fn repetition_count(history: &[u64], hash: u64) -> usize {
    history.iter().filter(|&&h| h == hash).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn insufficient(fen: &str) -> bool {
        is_insufficient_material(&Position::from_fen(fen).unwrap().board)
    }

    #[test]
    fn bare_kings() {
        assert!(insufficient("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
    }

    #[test]
    fn single_minor_piece() {
        assert!(insufficient("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        assert!(insufficient("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1"));
        assert!(insufficient("4k3/8/8/3n4/8/8/8/4K3 w - - 0 1"));
    }

    #[test]
    fn bishops_on_same_color() {
        // c1 and f8 are both dark squares.
        assert!(insufficient("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1"));
        // c1 dark, c8 light.
        assert!(!insufficient("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1"));
    }

    #[test]
    fn mating_material() {
        assert!(!insufficient("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1"));
        assert!(!insufficient("4k3/8/8/8/8/8/8/NN2K3 w - - 0 1"));
        assert!(!insufficient("4kn2/8/8/8/8/8/8/1N2K3 w - - 0 1"));
        assert!(!insufficient(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        ));
    }

    #[test]
    fn counts_repetitions() {
        assert_eq!(repetition_count(&[1, 2, 1, 3, 1], 1), 3);
        assert_eq!(repetition_count(&[1, 2], 7), 0);
    }
}
