//! Move representation.

use crate::Square;
use std::fmt;

/// Which rook the king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Toward column 8 (O-O).
    Kingside,
    /// Toward column 1 (O-O-O).
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column the rook starts on.
    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 8,
            CastleSide::Queenside => 1,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 3,
        }
    }

    /// Column the rook lands on.
    #[inline]
    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 4,
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "kingside"),
            CastleSide::Queenside => write!(f, "queenside"),
        }
    }
}

/// What a move does beyond relocating the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Non-capturing move.
    Quiet,
    /// Captures the piece standing on the destination.
    Capture,
    /// Pawn advance of two rows from its starting row.
    DoublePush,
    /// Pawn captures the pawn beside it by moving onto the skipped square.
    EnPassant,
    /// King moves two columns and the rook jumps over it.
    Castle(CastleSide),
    /// Pawn reaches the promotion row without capturing.
    Promotion,
    /// Pawn reaches the promotion row by capturing.
    PromotionCapture,
}

/// A move from one square to another.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move { from, to, kind }
    }

    /// Creates a non-capturing move with no special effect.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::new(from, to, MoveKind::Quiet)
    }

    /// Returns true if this move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::PromotionCapture
        )
    }

    /// Returns true if the moving pawn must be replaced after this move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion | MoveKind::PromotionCapture)
    }

    /// Returns the castling side if this is a castling move.
    #[inline]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castle(side) => Some(side),
            _ => None,
        }
    }

    /// Coordinate notation, e.g. "e2e4".
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?})", self.to_uci(), self.kind)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_uci() {
        assert_eq!(Move::quiet(sq("e2"), sq("e4")).to_uci(), "e2e4");
        assert_eq!(format!("{}", Move::quiet(sq("g1"), sq("f3"))), "g1f3");
    }

    #[test]
    fn capture_kinds() {
        let from = sq("e5");
        let to = sq("d6");
        assert!(Move::new(from, to, MoveKind::Capture).is_capture());
        assert!(Move::new(from, to, MoveKind::EnPassant).is_capture());
        assert!(Move::new(from, to, MoveKind::PromotionCapture).is_capture());
        assert!(!Move::new(from, to, MoveKind::Quiet).is_capture());
        assert!(!Move::new(from, to, MoveKind::Promotion).is_capture());
    }

    #[test]
    fn promotion_kinds() {
        let m = Move::new(sq("a7"), sq("a8"), MoveKind::Promotion);
        assert!(m.is_promotion());
        assert!(!Move::new(sq("a2"), sq("a4"), MoveKind::DoublePush).is_promotion());
    }

    #[test]
    fn castle_geometry() {
        let m = Move::new(Square::E1, Square::G1, MoveKind::Castle(CastleSide::Kingside));
        assert_eq!(m.castle_side(), Some(CastleSide::Kingside));
        assert_eq!(CastleSide::Kingside.rook_col(), 8);
        assert_eq!(CastleSide::Queenside.king_target_col(), 3);
        assert_eq!(CastleSide::Queenside.rook_target_col(), 4);
    }

    #[test]
    fn move_debug() {
        let m = Move::quiet(sq("e2"), sq("e3"));
        assert_eq!(format!("{:?}", m), "Move(e2e3 Quiet)");
    }
}
