//! Zobrist hashing for position identification.
//!
//! The hash XORs one random key per:
//! - piece on square (6 kinds x 2 colors x 64 squares)
//! - Black to move
//! - castling right still available (4 values)
//! - en-passant target square (64 values)
//!
//! Clocks are not part of the hash, so two positions reached at different
//! move numbers hash equal.

use chess_core::{Color, Piece, Square};

/// Zobrist hash keys, generated from a fixed seed.
pub struct ZobristKeys {
    /// Keys for pieces: [kind][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    /// Keys for castling rights: White O-O, White O-O-O, Black O-O, Black O-O-O.
    castling: [u64; 4],
    en_passant: [u64; 64],
}

impl ZobristKeys {
    /// Initializes the keys with an xorshift64 generator.
    pub const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 64];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[kind][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 64 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub const fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.pieces[piece.kind.index()][piece.color.index()][square.index()]
    }

    #[inline]
    pub const fn side_key(&self, side: Color) -> u64 {
        match side {
            Color::White => 0,
            Color::Black => self.black_to_move,
        }
    }

    /// Key for castling right 0-3.
    #[inline]
    pub const fn castling_key(&self, right: usize) -> u64 {
        self.castling[right]
    }

    #[inline]
    pub const fn en_passant_key(&self, square: Square) -> u64 {
        self.en_passant[square.index()]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
