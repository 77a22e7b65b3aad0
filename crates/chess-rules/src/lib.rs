//! Chess rules engine for a single interactively played game.
//!
//! This crate provides:
//! - [`Board`] and [`Position`] - piece placement and the full rules state
//! - attack detection and per-piece legal move generation ([`movegen`])
//! - castling, en passant and promotion as a suspended turn
//! - terminal detection: checkmate, stalemate and the draw rules ([`rules`])
//! - [`Game`] - a stateful game with position history
//! - [`Session`] - click-driven selection on top of a [`Game`]
//!
//! The engine never searches or evaluates; it only answers what is legal
//! and applies what was chosen.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_rules::{Game, GameResult};
//!
//! let sq = |s| Square::from_algebraic(s).unwrap();
//!
//! let mut game = Game::new();
//! assert_eq!(game.legal_targets(sq("e2")), vec![sq("e3"), sq("e4")]);
//!
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     game.play(sq(from), sq(to)).unwrap();
//! }
//! assert_eq!(game.result(), Some(GameResult::BlackWins));
//! assert!(game.in_check(Color::White));
//! ```

mod board;
mod config;
mod game;
pub mod movegen;
mod position;
pub mod rules;
mod session;
mod zobrist;

pub use board::Board;
pub use config::{ConfigError, RulesConfig};
pub use game::{Game, GameError, GameStatus, MoveOutcome, PendingPromotion};
pub use movegen::{
    can_castle, is_in_check, is_square_attacked, legal_moves, legal_targets, make_move,
    would_be_in_check, MoveList,
};
pub use position::{CastlingFlags, Position};
pub use rules::{DrawReason, GameResult};
pub use session::{Event, IgnoreReason, Outcome, Session, SharedSession};
pub use zobrist::{ZobristKeys, ZOBRIST};
