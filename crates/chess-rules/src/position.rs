//! Chess position representation.

use chess_core::{CastleSide, Color, Fen, FenError, PieceKind, Square};

use crate::movegen::is_in_check;
use crate::zobrist::ZOBRIST;
use crate::Board;

/// Per-color history flags that decide castling eligibility.
///
/// A rook captured on its home square is recorded as moved, since that side
/// can never castle again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingFlags {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

impl CastlingFlags {
    /// Nothing has moved yet.
    pub const FRESH: CastlingFlags = CastlingFlags {
        king_moved: false,
        kingside_rook_moved: false,
        queenside_rook_moved: false,
    };

    #[inline]
    pub const fn rook_moved(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside_rook_moved,
            CastleSide::Queenside => self.queenside_rook_moved,
        }
    }

    #[inline]
    pub fn mark_rook_moved(&mut self, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.kingside_rook_moved = true,
            CastleSide::Queenside => self.queenside_rook_moved = true,
        }
    }

    /// Returns true if neither the king nor the `side` rook has moved.
    #[inline]
    pub const fn retains(self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }
}

/// Complete rules state of the board between turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling history, indexed by [`Color::index`].
    pub castling: [CastlingFlags; 2],

    /// Square skipped by a pawn double step on the previous move.
    pub en_passant: Option<Square>,

    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::initial(),
            side_to_move: Color::White,
            castling: [CastlingFlags::FRESH; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a FEN string.
    ///
    /// A color with no castling letters is treated as having moved its king.
    /// Positions without exactly one king per color, or where the side that
    /// just moved is still in check, are rejected.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen = Fen::parse(fen)?;

        let mut castling = [CastlingFlags::FRESH; 2];
        for color in Color::BOTH {
            let flags = &mut castling[color.index()];
            for side in CastleSide::BOTH {
                if !fen.can_castle(color, side) {
                    flags.mark_rook_moved(side);
                }
            }
            flags.king_moved = CastleSide::BOTH
                .iter()
                .all(|&side| !fen.can_castle(color, side));
        }

        let board = Board::from_grid(&fen.placement);
        for color in Color::BOTH {
            let kings = board
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::InvalidKingCount(color, kings));
            }
        }
        let waiting = fen.side_to_move.opposite();
        if is_in_check(&board, waiting) {
            return Err(FenError::OpponentInCheck(waiting));
        }

        Ok(Position {
            board,
            side_to_move: fen.side_to_move,
            castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut castling = [[false; 2]; 2];
        for color in Color::BOTH {
            castling[color.index()] = [
                self.can_still_castle(color, CastleSide::Kingside),
                self.can_still_castle(color, CastleSide::Queenside),
            ];
        }
        Fen {
            placement: self.board.to_grid(),
            side_to_move: self.side_to_move,
            castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    #[inline]
    pub fn flags(&self, color: Color) -> CastlingFlags {
        self.castling[color.index()]
    }

    #[inline]
    pub fn flags_mut(&mut self, color: Color) -> &mut CastlingFlags {
        &mut self.castling[color.index()]
    }

    /// Returns true if the history flags still permit castling on `side`.
    ///
    /// This is the castling right, not the legality of castling right now.
    #[inline]
    pub fn can_still_castle(&self, color: Color, side: CastleSide) -> bool {
        self.flags(color).retains(side)
    }

    /// Returns true if the king of `color` is attacked.
    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    /// Position hash over board, side to move, castling rights and
    /// en-passant target.
    pub fn hash(&self) -> u64 {
        let mut hash = ZOBRIST.side_key(self.side_to_move);
        for (sq, piece) in self.board.pieces() {
            hash ^= ZOBRIST.piece_key(piece, sq);
        }
        let rights = [
            (Color::White, CastleSide::Kingside),
            (Color::White, CastleSide::Queenside),
            (Color::Black, CastleSide::Kingside),
            (Color::Black, CastleSide::Queenside),
        ];
        for (i, (color, side)) in rights.into_iter().enumerate() {
            if self.can_still_castle(color, side) {
                hash ^= ZOBRIST.castling_key(i);
            }
        }
        if let Some(sq) = self.en_passant {
            hash ^= ZOBRIST.en_passant_key(sq);
        }
        hash
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Piece;

    #[test]
    fn startpos_matches_fen() {
        assert_eq!(Position::startpos().to_fen(), Fen::STARTPOS);
        assert_eq!(Position::from_fen(Fen::STARTPOS).unwrap(), Position::startpos());
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
    }

    #[test]
    fn rejects_missing_or_extra_kings() {
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/R7 w - - 0 1"),
            Err(FenError::InvalidKingCount(Color::White, 0))
        );
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/R6K w - - 0 1").map(|p| p.side_to_move),
            Ok(Color::White)
        );
        assert_eq!(
            Position::from_fen("4k2k/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidKingCount(Color::Black, 2))
        );
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        assert_eq!(
            Position::from_fen("4k3/8/8/8/8/8/8/4R2K w - - 0 1"),
            Err(FenError::OpponentInCheck(Color::Black))
        );
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4R2K b - - 0 1").is_ok());
    }

    #[test]
    fn partial_castling_rights() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(pos.can_still_castle(Color::White, CastleSide::Kingside));
        assert!(!pos.can_still_castle(Color::White, CastleSide::Queenside));
        assert!(!pos.can_still_castle(Color::Black, CastleSide::Kingside));
        assert!(pos.can_still_castle(Color::Black, CastleSide::Queenside));
        assert!(!pos.flags(Color::White).king_moved);
    }

    #[test]
    fn no_castling_letters_means_king_moved() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(pos.flags(Color::White).king_moved);
        assert!(pos.flags(Color::Black).king_moved);
    }

    #[test]
    fn castling_flags_retain() {
        let mut flags = CastlingFlags::FRESH;
        assert!(flags.retains(CastleSide::Kingside));
        flags.mark_rook_moved(CastleSide::Kingside);
        assert!(!flags.retains(CastleSide::Kingside));
        assert!(flags.retains(CastleSide::Queenside));
        flags.king_moved = true;
        assert!(!flags.retains(CastleSide::Queenside));
    }

    #[test]
    fn hash_ignores_clocks() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 37 60").unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn hash_sees_side_castling_and_en_passant() {
        let base = Position::from_fen("4k3/8/8/8/4P3/8/8/R3K3 w Q - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/8/4P3/8/8/R3K3 b Q - 0 1").unwrap();
        let no_castle = Position::from_fen("4k3/8/8/8/4P3/8/8/R3K3 w - - 0 1").unwrap();
        let ep = Position::from_fen("4k3/8/8/8/4P3/8/8/R3K3 b Q e3 0 1").unwrap();
        assert_ne!(base.hash(), black.hash());
        assert_ne!(base.hash(), no_castle.hash());
        assert_ne!(black.hash(), ep.hash());
    }

    #[test]
    fn hash_sees_piece_kind() {
        let mut a = Position::startpos();
        let b = a.clone();
        a.board
            .put(Square::D1, Piece::new(Color::White, PieceKind::Rook));
        assert_ne!(a.hash(), b.hash());
    }
}
