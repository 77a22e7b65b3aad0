//! Core types for chess.
//!
//! This crate provides the fundamental types used by the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (1-based row and column)
//! - [`Move`], [`MoveKind`] and [`CastleSide`] for move representation
//! - FEN parsing and serialization for setting up positions

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{CastleSide, Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::Square;
