//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Used to set up arbitrary positions for tests and for starting a game
//! somewhere other than the initial array.

use crate::{CastleSide, Color, Piece, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("expected exactly one {0} king, found {1}")]
    InvalidKingCount(Color, usize),

    #[error("{0} is in check but not to move")]
    OpponentInCheck(Color),
}

/// A parsed FEN record.
///
/// `placement[row - 1][col - 1]` holds the piece on that square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub placement: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    /// `castling[color][side]`, side 0 = kingside, 1 = queenside.
    pub castling: [[bool; 2]; 2],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a six-field FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            s => {
                let sq = Square::from_algebraic(s)
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(s.to_string()))?;
                // The square the opponent's pawn skipped on its double step.
                let expected_row = match side_to_move {
                    Color::White => 6,
                    Color::Black => 3,
                };
                if sq.row() != expected_row {
                    return Err(FenError::InvalidEnPassantSquare(s.to_string()));
                }
                Some(sq)
            }
        };

        let halfmove_clock = parts[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
        let fullmove_number: u32 = parts[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;
        if fullmove_number == 0 {
            return Err(FenError::InvalidFullmoveNumber(parts[5].to_string()));
        }

        Ok(Fen {
            placement,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Returns the piece the record places on `sq`.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.placement[(sq.row() - 1) as usize][(sq.col() - 1) as usize]
    }

    /// Returns true if the record grants `color` castling on `side`.
    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling[color.index()][side_index(side)]
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            let mut empty = 0;
            for col in 0..8 {
                match self.placement[row][col] {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if row > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} ", self.side_to_move.fen_char())?;

        let mut any = false;
        for (color, letters) in [(Color::White, ['K', 'Q']), (Color::Black, ['k', 'q'])] {
            for (side, letter) in CastleSide::BOTH.into_iter().zip(letters) {
                if self.can_castle(color, side) {
                    write!(f, "{}", letter)?;
                    any = true;
                }
            }
        }
        if !any {
            write!(f, "-")?;
        }

        match self.en_passant {
            Some(sq) => write!(f, " {}", sq)?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

fn side_index(side: CastleSide) -> usize {
    match side {
        CastleSide::Kingside => 0,
        CastleSide::Queenside => 1,
    }
}

fn parse_placement(s: &str) -> Result<[[Option<Piece>; 8]; 8], FenError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placement = [[None; 8]; 8];
    // FEN lists row 8 first.
    for (i, row_str) in rows.iter().enumerate() {
        let row = 7 - i;
        let mut col = 0usize;
        for c in row_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid empty-square count '{}'",
                        c
                    )));
                }
                col += skip as usize;
            } else {
                let piece = Piece::from_fen_char(c).ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!("invalid piece character '{}'", c))
                })?;
                if col < 8 {
                    placement[row][col] = Some(piece);
                }
                col += 1;
            }
        }
        if col != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} describes {} squares",
                row + 1,
                col
            )));
        }
    }
    Ok(placement)
}

fn parse_castling(s: &str) -> Result<[[bool; 2]; 2], FenError> {
    let mut rights = [[false; 2]; 2];
    if s == "-" {
        return Ok(rights);
    }
    for c in s.chars() {
        let (color, side) = match c {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => return Err(FenError::InvalidCastlingRights(s.to_string())),
        };
        rights[color.index()][side_index(side)] = true;
    }
    Ok(rights)
}
