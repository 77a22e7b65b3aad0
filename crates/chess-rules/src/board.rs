//! Square-to-piece mapping.

use chess_core::{Color, Piece, PieceKind, Square};
use std::fmt;

/// Every square of the board mapped to an optional piece.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard initial array.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::BOTH {
            for (col, kind) in (1..=8u8).zip(BACK_RANK) {
                if let Some(sq) = Square::new(color.home_row(), col) {
                    board.put(sq, Piece::new(color, kind));
                }
                if let Some(sq) = Square::new(color.pawn_start_row(), col) {
                    board.put(sq, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Places `piece` on `sq`, returning whatever stood there before.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.index()].replace(piece)
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Returns true if `sq` holds a piece of `color`.
    #[inline]
    pub fn is_color(&self, sq: Square, color: Color) -> bool {
        matches!(self.get(sq), Some(p) if p.color == color)
    }

    /// Locates the king of `color`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// Iterates all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Builds a board from a `[row - 1][col - 1]` grid.
    pub fn from_grid(grid: &[[Option<Piece>; 8]; 8]) -> Self {
        let mut board = Board::empty();
        for sq in Square::all() {
            board.squares[sq.index()] = grid[(sq.row() - 1) as usize][(sq.col() - 1) as usize];
        }
        board
    }

    /// The inverse of [`Board::from_grid`].
    pub fn to_grid(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for (sq, piece) in self.pieces() {
            grid[(sq.row() - 1) as usize][(sq.col() - 1) as usize] = Some(piece);
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in (1..=8u8).rev() {
            write!(f, "{} ", row)?;
            for col in 1..=8u8 {
                let c = Square::new(row, col)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board.king_square(Color::White), None);
    }

    #[test]
    fn initial_array() {
        let board = Board::initial();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(
            board.get(Square::D1),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(
            board.get(Square::from_algebraic("h7").unwrap()),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
    }

    #[test]
    fn put_and_take() {
        let mut board = Board::empty();
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(board.put(Square::C1, knight), None);
        assert!(board.is_color(Square::C1, Color::Black));
        assert_eq!(board.take(Square::C1), Some(knight));
        assert!(board.is_empty(Square::C1));
    }

    #[test]
    fn grid_roundtrip() {
        let board = Board::initial();
        assert_eq!(Board::from_grid(&board.to_grid()), board);
    }

    #[test]
    fn missing_king() {
        assert_eq!(Board::empty().king_square(Color::White), None);
    }
}
