//! Terminal conditions: checkmate, stalemate and the draw rules.
//!
//! [`evaluate`] runs after every completed turn. Draw conditions are checked
//! first, so a move that mates while also completing a threefold repetition
//! ends the game drawn.

mod draw;

pub use draw::{is_insufficient_material, repetition_count};

use crate::movegen::has_any_legal_move;
use crate::{Position, RulesConfig};
use chess_core::Color;
use std::fmt;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// The result of checkmating `loser`.
    #[inline]
    pub const fn checkmate(loser: Color) -> Self {
        match loser {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }

    /// The winning color, or `None` for a draw.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(self, GameResult::Draw(_))
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "Checkmate! {} wins!", Color::White),
            GameResult::BlackWins => write!(f, "Checkmate! {} wins!", Color::Black),
            GameResult::Draw(reason) => write!(f, "Draw: {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// Insufficient material to checkmate.
    InsufficientMaterial,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// Draw by agreement.
    Agreement,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::Stalemate => "Stalemate",
            DrawReason::InsufficientMaterial => "Insufficient Material",
            DrawReason::FiftyMoveRule => "Fifty-Move Rule",
            DrawReason::ThreefoldRepetition => "Threefold Repetition",
            DrawReason::Agreement => "Agreement",
        })
    }
}

/// Decides whether the game is over after a completed turn.
///
/// `history` holds the hash of every position reached so far, including the
/// current one.
pub fn evaluate(position: &Position, history: &[u64], config: &RulesConfig) -> Option<GameResult> {
    if repetition_count(history, position.hash()) >= config.repetition_limit {
        return Some(GameResult::Draw(DrawReason::ThreefoldRepetition));
    }
    if position.halfmove_clock >= config.fifty_move_halfmoves {
        return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
    }
    if is_insufficient_material(&position.board) {
        return Some(GameResult::Draw(DrawReason::InsufficientMaterial));
    }

    let us = position.side_to_move;
    if has_any_legal_move(position, us) {
        return None;
    }
    Some(if position.is_in_check(us) {
        GameResult::checkmate(us)
    } else {
        GameResult::Draw(DrawReason::Stalemate)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(fen: &str) -> Option<GameResult> {
        let position = Position::from_fen(fen).unwrap();
        evaluate(&position, &[position.hash()], &RulesConfig::default())
    }

    #[test]
    fn ongoing_startpos() {
        assert_eq!(eval("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), None);
    }

    #[test]
    fn back_rank_mate() {
        assert_eq!(
            eval("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
            Some(GameResult::WhiteWins)
        );
    }

    #[test]
    fn stalemate() {
        assert_eq!(
            eval("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"),
            Some(GameResult::Draw(DrawReason::Stalemate))
        );
    }

    #[test]
    fn fifty_move_threshold() {
        assert_eq!(eval("4k3/8/8/8/8/8/8/R3K3 w - - 99 80"), None);
        assert_eq!(
            eval("4k3/8/8/8/8/8/8/R3K3 w - - 100 80"),
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        );
    }

    #[test]
    fn draw_checked_before_mate() {
        // Mated, but the clock already ran out.
        assert_eq!(
            eval("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 100 60"),
            Some(GameResult::Draw(DrawReason::FiftyMoveRule))
        );
    }

    #[test]
    fn repetition_uses_configured_limit() {
        let position = Position::startpos();
        let h = position.hash();
        let config = RulesConfig::default();
        assert_eq!(evaluate(&position, &[h, 1, h], &config), None);
        assert_eq!(
            evaluate(&position, &[h, 1, h, 2, h], &config),
            Some(GameResult::Draw(DrawReason::ThreefoldRepetition))
        );
        let strict = RulesConfig {
            repetition_limit: 2,
            ..RulesConfig::default()
        };
        assert!(evaluate(&position, &[h, 1, h], &strict).is_some());
    }

    #[test]
    fn result_text() {
        assert_eq!(GameResult::WhiteWins.to_string(), "Checkmate! White wins!");
        assert_eq!(
            GameResult::Draw(DrawReason::ThreefoldRepetition).to_string(),
            "Draw: Threefold Repetition"
        );
        assert_eq!(GameResult::checkmate(Color::Black), GameResult::WhiteWins);
        assert_eq!(GameResult::BlackWins.winner(), Some(Color::Black));
        assert!(GameResult::Draw(DrawReason::Agreement).is_draw());
    }
}
