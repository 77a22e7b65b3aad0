//! WebAssembly bindings for the chess rules engine.
//!
//! The page forwards clicks and prompt choices to a [`ChessTable`] and
//! redraws from the plain objects it returns.
//!
//! # Usage
//!
//! ```javascript
//! import init, { ChessTable } from 'chess-wasm';
//!
//! await init();
//!
//! const table = new ChessTable();
//! table.clickSquare("e2");   // { type: "selected", square: "e2", targets: ["e3", "e4"] }
//! table.clickSquare("e4");   // { type: "moved", from: "e2", to: "e4", status: "Black to move", ... }
//! console.log(table.status());
//! ```

use chess_core::{Color, Piece, PieceKind, Square};
use chess_rules::{
    Event, Game, IgnoreReason, Outcome, RulesConfig, Session, SharedSession,
};
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

/// One occupied square, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub square: String,
    pub color: String,
    pub kind: String,
    /// FEN letter: uppercase for White.
    pub symbol: char,
}

impl PieceView {
    fn new(square: Square, piece: Piece) -> Self {
        PieceView {
            square: square.to_algebraic(),
            color: color_name(piece.color),
            kind: piece.kind.to_string().to_lowercase(),
            symbol: piece.to_fen_char(),
        }
    }
}

/// What the page should redraw after an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutcomeView {
    Selected {
        square: String,
        targets: Vec<String>,
    },
    Deselected,
    #[serde(rename_all = "camelCase")]
    Moved {
        from: String,
        to: String,
        status: String,
        game_over: bool,
    },
    PromotionRequired {
        color: String,
        square: String,
    },
    #[serde(rename_all = "camelCase")]
    Promoted {
        square: String,
        piece: String,
        status: String,
        game_over: bool,
    },
    DrawAgreed {
        status: String,
    },
    Reset,
    Ignored {
        reason: String,
    },
}

fn color_name(color: Color) -> String {
    color.to_string().to_lowercase()
}

fn squares(list: &[Square]) -> Vec<String> {
    list.iter().map(|sq| sq.to_algebraic()).collect()
}

fn ignored(reason: IgnoreReason) -> OutcomeView {
    OutcomeView::Ignored {
        reason: format!("{:?}", reason),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// An interactively played game, driven by clicks.
#[wasm_bindgen]
pub struct ChessTable {
    session: SharedSession,
}

impl Default for ChessTable {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ChessTable {
    /// Creates a table with the standard starting position.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        ChessTable {
            session: SharedSession::default(),
        }
    }

    /// Creates a table from a FEN string.
    ///
    /// Returns an error if the FEN is invalid.
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<ChessTable, JsError> {
        let game =
            Game::from_fen(fen, RulesConfig::default()).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ChessTable {
            session: SharedSession::new(Session::new(game)),
        })
    }

    /// Reports a click on a square given in algebraic notation ("e2").
    #[wasm_bindgen(js_name = clickSquare)]
    pub fn click_square(&self, square: &str) -> Result<JsValue, JsError> {
        to_js(&self.click(square))
    }

    /// Supplies the piece for a pending promotion ("queen", "rook", "bishop",
    /// "knight" or their letters).
    #[wasm_bindgen(js_name = choosePromotion)]
    pub fn choose_promotion(&self, piece: &str) -> Result<JsValue, JsError> {
        to_js(&self.promote(piece))
    }

    /// Ends the game as a draw by agreement.
    #[wasm_bindgen(js_name = agreeDraw)]
    pub fn agree_draw(&self) -> Result<JsValue, JsError> {
        to_js(&self.send(Event::DrawAgreed))
    }

    /// Starts a new game from the initial position.
    pub fn reset(&self) -> Result<JsValue, JsError> {
        to_js(&self.send(Event::ResetRequested))
    }

    /// Every piece on the board as `{ square, color, kind, symbol }`.
    pub fn board(&self) -> Result<JsValue, JsError> {
        to_js(&self.pieces())
    }

    /// "white" or "black".
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        self.session
            .inspect(|s| color_name(s.game().side_to_move()))
            .unwrap_or_default()
    }

    /// Human-readable game status, such as "Check! Black to move" or
    /// "Draw: Threefold Repetition".
    pub fn status(&self) -> String {
        self.session
            .inspect(|s| s.game().status().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session
            .inspect(|s| s.game().is_over())
            .unwrap_or(false)
    }

    /// The two squares of the last completed move, or an empty array.
    #[wasm_bindgen(js_name = lastMove)]
    pub fn last_move(&self) -> Vec<String> {
        self.session
            .inspect(|s| {
                s.game()
                    .last_move()
                    .map(|(from, to)| squares(&[from, to]))
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Color of the pawn awaiting a promotion choice, if any.
    #[wasm_bindgen(js_name = pendingPromotion)]
    pub fn pending_promotion(&self) -> Option<String> {
        self.session
            .inspect(|s| s.game().pending_promotion().map(|p| color_name(p.color)))
            .flatten()
    }

    /// Currently selected square, if any.
    pub fn selected(&self) -> Option<String> {
        self.session
            .inspect(|s| s.selected().map(|sq| sq.to_algebraic()))
            .flatten()
    }

    /// Legal destinations of the piece on `square`.
    #[wasm_bindgen(js_name = legalTargets)]
    pub fn legal_targets(&self, square: &str) -> Vec<String> {
        let Some(square) = Square::from_algebraic(square) else {
            return Vec::new();
        };
        self.session
            .inspect(|s| squares(&s.game().legal_targets(square)))
            .unwrap_or_default()
    }

    /// Fullmove number, starting at 1.
    #[wasm_bindgen(js_name = moveNumber)]
    pub fn move_number(&self) -> u32 {
        self.session
            .inspect(|s| s.game().fullmove_number())
            .unwrap_or(1)
    }

    /// FEN letters of the pieces `color` ("white" or "black") has captured.
    #[wasm_bindgen(js_name = capturedBy)]
    pub fn captured_by(&self, color: &str) -> Vec<String> {
        let color = match color {
            "white" => Color::White,
            "black" => Color::Black,
            _ => return Vec::new(),
        };
        self.session
            .inspect(|s| {
                s.game()
                    .captured_by(color)
                    .iter()
                    .map(|p| p.to_fen_char().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the current position as a FEN string.
    #[wasm_bindgen(js_name = toFen)]
    pub fn to_fen(&self) -> String {
        self.session
            .inspect(|s| s.game().position().to_fen())
            .unwrap_or_default()
    }
}

impl ChessTable {
    /// Handles a click and returns the view without converting it to JS.
    pub fn click(&self, square: &str) -> OutcomeView {
        match Square::from_algebraic(square) {
            Some(square) => self.send(Event::SquareClicked(square)),
            None => {
                debug!(square, "click on unknown square");
                ignored(IgnoreReason::InvalidSelection)
            }
        }
    }

    /// Handles a promotion choice and returns the view without converting it
    /// to JS.
    pub fn promote(&self, piece: &str) -> OutcomeView {
        match PieceKind::from_name(piece) {
            Some(kind) => self.send(Event::PromotionChosen(kind)),
            None => {
                debug!(piece, "unknown promotion piece");
                ignored(IgnoreReason::InvalidPromotionPiece)
            }
        }
    }

    pub fn pieces(&self) -> Vec<PieceView> {
        self.session
            .inspect(|s| {
                s.game()
                    .board()
                    .pieces()
                    .map(|(sq, piece)| PieceView::new(sq, piece))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn send(&self, event: Event) -> OutcomeView {
        match self.session.dispatch(event) {
            Outcome::Selected { square, targets } => OutcomeView::Selected {
                square: square.to_algebraic(),
                targets: squares(&targets),
            },
            Outcome::Deselected => OutcomeView::Deselected,
            Outcome::Moved { from, to, status } => OutcomeView::Moved {
                from: from.to_algebraic(),
                to: to.to_algebraic(),
                status: status.to_string(),
                game_over: status.is_over(),
            },
            Outcome::PromotionRequired { color, square } => OutcomeView::PromotionRequired {
                color: color_name(color),
                square: square.to_algebraic(),
            },
            Outcome::Promoted {
                square,
                kind,
                status,
            } => OutcomeView::Promoted {
                square: square.to_algebraic(),
                piece: kind.to_string().to_lowercase(),
                status: status.to_string(),
                game_over: status.is_over(),
            },
            Outcome::DrawAgreed => OutcomeView::DrawAgreed {
                status: self.status(),
            },
            Outcome::Reset => OutcomeView::Reset,
            Outcome::Ignored(reason) => ignored(reason),
        }
    }
}
