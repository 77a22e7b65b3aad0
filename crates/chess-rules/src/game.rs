//! Full game management with history tracking.
//!
//! The [`Game`] struct owns everything that changes over a game:
//! - the current position and the hash of every position reached
//! - the suspended turn of a pawn waiting for its promotion piece
//! - the result, once a terminal condition has fired
//! - display bookkeeping (last move, captured pieces, move counter)

use crate::movegen::{self, apply_move_effects, apply_promotion, finish_turn, legal_moves_from};
use crate::rules::{self, DrawReason, GameResult};
use crate::{Board, Position, RulesConfig};
use chess_core::{Color, FenError, Piece, PieceKind, Square};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Error type for game operations.
///
/// Every error leaves the game exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// A pawn is waiting for its promotion piece.
    #[error("a promotion choice is pending")]
    PromotionPending,
    /// A promotion piece was supplied with no promotion pending.
    #[error("no promotion is pending")]
    NoPromotionPending,
    /// The square is empty or holds a piece of the side not to move.
    #[error("no piece of the side to move on {0}")]
    InvalidSelection(Square),
    /// The move is not legal in the current position.
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },
    /// Pawns cannot promote to this kind.
    #[error("cannot promote to {0}")]
    InvalidPromotionPiece(PieceKind),
    /// Draw agreement is switched off in the configuration.
    #[error("draw by agreement is disabled")]
    DrawAgreementDisabled,
}

/// A pawn standing on its promotion row, waiting for a replacement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub color: Color,
    pub from: Square,
    pub square: Square,
}

/// Where the game stands between inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing { to_move: Color, check: bool },
    AwaitingPromotion { color: Color, square: Square },
    Over(GameResult),
}

impl GameStatus {
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Over(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing {
                to_move,
                check: true,
            } => write!(f, "Check! {} to move", to_move),
            GameStatus::Ongoing { to_move, .. } => write!(f, "{} to move", to_move),
            GameStatus::AwaitingPromotion { color, .. } => {
                write!(f, "{} to choose a promotion piece", color)
            }
            GameStatus::Over(result) => write!(f, "{}", result),
        }
    }
}

/// What a successful [`Game::play`] or [`Game::promote`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The turn is complete and the other side is to move (or the game ended).
    Completed {
        from: Square,
        to: Square,
        status: GameStatus,
    },
    /// The pawn reached its last row; call [`Game::promote`] to finish.
    PromotionPending { color: Color, square: Square },
}

/// A complete chess game with history tracking.
///
/// Unlike [`Position`], which represents a single board state, `Game` tracks
/// the position history needed for repetition detection and freezes once a
/// result is reached.
#[derive(Debug, Clone)]
pub struct Game {
    config: RulesConfig,
    position: Position,
    /// Hash of every position reached, the starting one included.
    history: Vec<u64>,
    pending: Option<PendingPromotion>,
    result: Option<GameResult>,
    last_move: Option<(Square, Square)>,
    /// Pieces taken, indexed by the capturing color.
    captured: [Vec<Piece>; 2],
    move_count: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Creates a new game with custom draw thresholds.
    pub fn with_config(config: RulesConfig) -> Self {
        Self::from_position(Position::startpos(), config)
    }

    /// Creates a game from a FEN string.
    ///
    /// A position that is already terminal yields a finished game.
    pub fn from_fen(fen: &str, config: RulesConfig) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?, config))
    }

    fn from_position(position: Position, config: RulesConfig) -> Self {
        let history = vec![position.hash()];
        let result = rules::evaluate(&position, &history, &config);
        Game {
            config,
            position,
            history,
            pending: None,
            result,
            last_move: None,
            captured: [Vec::new(), Vec::new()],
            move_count: 0,
        }
    }

    /// Throws the game away and starts again from the initial position.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config.clone());
        info!("game reset");
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.position.is_in_check(self.position.side_to_move)
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.position.is_in_check(color)
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    /// The squares of the most recently completed move.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    /// Completed half-moves since the game started.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmove_number
    }

    /// Pieces `color` has captured, in order.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.index()]
    }

    /// How many times the current position has occurred.
    pub fn position_count(&self) -> usize {
        rules::repetition_count(&self.history, self.position.hash())
    }

    pub fn status(&self) -> GameStatus {
        if let Some(result) = self.result {
            return GameStatus::Over(result);
        }
        if let Some(p) = self.pending {
            return GameStatus::AwaitingPromotion {
                color: p.color,
                square: p.square,
            };
        }
        GameStatus::Ongoing {
            to_move: self.position.side_to_move,
            check: self.is_check(),
        }
    }

    /// Squares the piece on `square` may legally move to.
    ///
    /// Empty when the game is over, a promotion is pending, or the square
    /// holds no piece of the side to move.
    pub fn legal_targets(&self, square: Square) -> Vec<Square> {
        if self.result.is_some() || self.pending.is_some() || !self.owns(square) {
            return Vec::new();
        }
        movegen::legal_targets(&self.position, square)
    }

    fn owns(&self, square: Square) -> bool {
        self.position
            .board
            .is_color(square, self.position.side_to_move)
    }

    /// Plays the piece on `from` to `to`.
    ///
    /// A pawn reaching its last row suspends the turn: the side to move,
    /// clocks, history and terminal state stay as they are until
    /// [`Game::promote`] supplies the new piece.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            return Err(GameError::PromotionPending);
        }
        if !self.owns(from) {
            return Err(GameError::InvalidSelection(from));
        }

        let m = legal_moves_from(&self.position, from)
            .find(from, to)
            .ok_or(GameError::IllegalMove { from, to })?;
        let effects =
            apply_move_effects(&mut self.position, m).ok_or(GameError::InvalidSelection(from))?;
        let us = effects.moved.color;
        if let Some(victim) = effects.captured {
            self.captured[us.index()].push(victim);
        }

        if m.is_promotion() {
            self.pending = Some(PendingPromotion {
                color: us,
                from,
                square: to,
            });
            debug!(%from, %to, color = %us, "awaiting promotion choice");
            return Ok(MoveOutcome::PromotionPending { color: us, square: to });
        }

        let status = self.complete_turn(from, to, effects.resets_halfmove_clock());
        Ok(MoveOutcome::Completed { from, to, status })
    }

    /// Finishes a suspended promotion with `kind`.
    pub fn promote(&mut self, kind: PieceKind) -> Result<MoveOutcome, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        let pending = self.pending.ok_or(GameError::NoPromotionPending)?;
        if !kind.is_promotion_choice() {
            return Err(GameError::InvalidPromotionPiece(kind));
        }

        self.pending = None;
        apply_promotion(&mut self.position, pending.square, kind);
        debug!(square = %pending.square, %kind, "pawn promoted");
        let status = self.complete_turn(pending.from, pending.square, true);
        Ok(MoveOutcome::Completed {
            from: pending.from,
            to: pending.square,
            status,
        })
    }

    /// Ends the game as a draw by mutual agreement.
    pub fn agree_draw(&mut self) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            return Err(GameError::PromotionPending);
        }
        if !self.config.allow_draw_agreement {
            return Err(GameError::DrawAgreementDisabled);
        }
        self.finish(GameResult::Draw(DrawReason::Agreement));
        Ok(())
    }

    fn complete_turn(&mut self, from: Square, to: Square, resets_halfmove_clock: bool) -> GameStatus {
        finish_turn(&mut self.position, resets_halfmove_clock);
        self.move_count += 1;
        self.last_move = Some((from, to));
        self.history.push(self.position.hash());
        debug!(%from, %to, ply = self.move_count, "move played");

        if let Some(result) = rules::evaluate(&self.position, &self.history, &self.config) {
            self.finish(result);
        }
        self.status()
    }

    fn finish(&mut self, result: GameResult) {
        self.result = Some(result);
        info!(%result, moves = self.move_count, "game over");
    }
}
