//! Board square representation.

use std::fmt;

/// A square on the board, addressed by row and column, both in `1..=8`.
///
/// Row 1 is White's home row and column 1 is the a-file, so `(1, 5)` is e1
/// and `(8, 4)` is d8.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, or `None` if either coordinate is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row >= 1 && row <= 8 && col >= 1 && col <= 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Creates a square from a 0-63 index (a1 = 0, h1 = 7, a2 = 8, ..., h8 = 63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square {
                row: index / 8 + 1,
                col: index % 8 + 1,
            })
        } else {
            None
        }
    }

    /// Parses algebraic notation such as "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Square::new(rank - b'0', file - b'a' + 1)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the 0-63 index.
    #[inline]
    pub const fn index(self) -> usize {
        ((self.row - 1) * 8 + (self.col - 1)) as usize
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 1 || row > 8 || col < 1 || col > 8 {
            return None;
        }
        Some(Square {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Light squares have an odd row + column sum (h1 is light).
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.col - 1) as char, self.row)
    }

    /// Iterates every square, row 1 first, column 1 first within a row.
    pub fn all() -> impl Iterator<Item = Square> {
        (1..=8u8).flat_map(|row| (1..=8u8).map(move |col| Square { row, col }))
    }

    pub const A1: Square = Square { row: 1, col: 1 };
    pub const C1: Square = Square { row: 1, col: 3 };
    pub const D1: Square = Square { row: 1, col: 4 };
    pub const E1: Square = Square { row: 1, col: 5 };
    pub const F1: Square = Square { row: 1, col: 6 };
    pub const G1: Square = Square { row: 1, col: 7 };
    pub const H1: Square = Square { row: 1, col: 8 };
    pub const A8: Square = Square { row: 8, col: 1 };
    pub const C8: Square = Square { row: 8, col: 3 };
    pub const D8: Square = Square { row: 8, col: 4 };
    pub const E8: Square = Square { row: 8, col: 5 };
    pub const F8: Square = Square { row: 8, col: 6 };
    pub const G8: Square = Square { row: 8, col: 7 };
    pub const H8: Square = Square { row: 8, col: 8 };
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_new_bounds() {
        assert!(Square::new(1, 1).is_some());
        assert!(Square::new(8, 8).is_some());
        assert!(Square::new(0, 4).is_none());
        assert!(Square::new(4, 9).is_none());
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 5));
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(4, 5).unwrap().to_algebraic(), "e4");
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::A1.offset(1, 2), Square::new(2, 3));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
    }

    #[test]
    fn index_roundtrip() {
        for sq in Square::all() {
            assert_eq!(Square::from_index(sq.index() as u8), Some(sq));
        }
        assert_eq!(Square::all().count(), 64);
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn square_colors() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(!Square::H8.is_light());
    }

    proptest! {
        #[test]
        fn offset_round_trips(row in 1u8..=8, col in 1u8..=8, dr in -7i8..=7, dc in -7i8..=7) {
            let sq = Square::new(row, col).unwrap();
            let target = sq.offset(dr, dc);
            let on_board = (1..=8).contains(&(row as i8 + dr)) && (1..=8).contains(&(col as i8 + dc));
            prop_assert_eq!(target.is_some(), on_board);
            if let Some(t) = target {
                prop_assert_eq!(t.offset(-dr, -dc), Some(sq));
                prop_assert_eq!(Square::from_index(t.index() as u8), Some(t));
            }
        }
    }
}
