//! Click-driven controller between a board display and a [`Game`].
//!
//! The display reports raw input as [`Event`]s and redraws from the returned
//! [`Outcome`]. Invalid input never fails: it comes back as
//! [`Outcome::Ignored`] and the game is left untouched.

use crate::game::{Game, GameError, GameStatus, MoveOutcome};
use chess_core::{Color, PieceKind, Square};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Input from the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SquareClicked(Square),
    PromotionChosen(PieceKind),
    DrawAgreed,
    ResetRequested,
}

/// Why an event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GameOver,
    PromotionPending,
    /// Empty square or opponent piece clicked with nothing selected.
    InvalidSelection,
    /// The selected piece cannot move to the clicked square.
    IllegalTarget,
    NoPromotionPending,
    InvalidPromotionPiece,
    DrawAgreementDisabled,
    /// Another event was still being applied.
    Busy,
}

impl From<GameError> for IgnoreReason {
    fn from(err: GameError) -> Self {
        match err {
            GameError::GameOver => IgnoreReason::GameOver,
            GameError::PromotionPending => IgnoreReason::PromotionPending,
            GameError::NoPromotionPending => IgnoreReason::NoPromotionPending,
            GameError::InvalidSelection(_) => IgnoreReason::InvalidSelection,
            GameError::IllegalMove { .. } => IgnoreReason::IllegalTarget,
            GameError::InvalidPromotionPiece(_) => IgnoreReason::InvalidPromotionPiece,
            GameError::DrawAgreementDisabled => IgnoreReason::DrawAgreementDisabled,
        }
    }
}

/// What the display should show after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A piece is selected; highlight `targets`.
    Selected { square: Square, targets: Vec<Square> },
    Deselected,
    Moved {
        from: Square,
        to: Square,
        status: GameStatus,
    },
    /// Show the promotion prompt for `color`.
    PromotionRequired { color: Color, square: Square },
    Promoted {
        square: Square,
        kind: PieceKind,
        status: GameStatus,
    },
    DrawAgreed,
    Reset,
    Ignored(IgnoreReason),
}

/// A game plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct Session {
    game: Game,
    selected: Option<Square>,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Session {
            game,
            selected: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal targets of the selected piece.
    pub fn highlighted(&self) -> Vec<Square> {
        self.selected
            .map(|sq| self.game.legal_targets(sq))
            .unwrap_or_default()
    }

    pub fn handle(&mut self, event: Event) -> Outcome {
        let outcome = match event {
            Event::SquareClicked(square) => self.click(square),
            Event::PromotionChosen(kind) => match self.game.promote(kind) {
                Ok(MoveOutcome::Completed { to, status, .. }) => Outcome::Promoted {
                    square: to,
                    kind,
                    status,
                },
                Ok(MoveOutcome::PromotionPending { color, square }) => {
                    Outcome::PromotionRequired { color, square }
                }
                Err(err) => Outcome::Ignored(err.into()),
            },
            Event::DrawAgreed => match self.game.agree_draw() {
                Ok(()) => {
                    self.selected = None;
                    Outcome::DrawAgreed
                }
                Err(err) => Outcome::Ignored(err.into()),
            },
            Event::ResetRequested => {
                self.game.reset();
                self.selected = None;
                Outcome::Reset
            }
        };
        if let Outcome::Ignored(reason) = outcome {
            debug!(?event, ?reason, "input ignored");
        }
        outcome
    }

    fn click(&mut self, square: Square) -> Outcome {
        if self.game.is_over() {
            return Outcome::Ignored(IgnoreReason::GameOver);
        }
        if self.game.pending_promotion().is_some() {
            return Outcome::Ignored(IgnoreReason::PromotionPending);
        }

        let own = self.game.board().is_color(square, self.game.side_to_move());
        match self.selected {
            Some(selected) if selected == square => {
                self.selected = None;
                Outcome::Deselected
            }
            _ if own => self.select(square),
            Some(selected) => match self.game.play(selected, square) {
                Ok(MoveOutcome::Completed { from, to, status }) => {
                    self.selected = None;
                    Outcome::Moved { from, to, status }
                }
                Ok(MoveOutcome::PromotionPending { color, square }) => {
                    self.selected = None;
                    Outcome::PromotionRequired { color, square }
                }
                Err(err) => Outcome::Ignored(err.into()),
            },
            None => Outcome::Ignored(IgnoreReason::InvalidSelection),
        }
    }

    fn select(&mut self, square: Square) -> Outcome {
        let targets = self.game.legal_targets(square);
        debug!(%square, targets = targets.len(), "piece selected");
        self.selected = Some(square);
        Outcome::Selected { square, targets }
    }
}

/// A [`Session`] shared between event sources on one thread.
///
/// An event delivered while another is still being applied is dropped as
/// [`IgnoreReason::Busy`] instead of interleaving with it.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Rc<RefCell<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        SharedSession {
            inner: Rc::new(RefCell::new(session)),
        }
    }

    pub fn dispatch(&self, event: Event) -> Outcome {
        match self.inner.try_borrow_mut() {
            Ok(mut session) => session.handle(event),
            Err(_) => {
                debug!(?event, "event dropped while another is in progress");
                Outcome::Ignored(IgnoreReason::Busy)
            }
        }
    }

    /// Reads the session, or returns `None` while an event is being applied.
    pub fn inspect<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.inner.try_borrow().ok().map(|session| f(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameResult;
    use crate::RulesConfig;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn click(session: &mut Session, s: &str) -> Outcome {
        session.handle(Event::SquareClicked(sq(s)))
    }

    #[test]
    fn select_then_move() {
        let mut session = Session::default();
        let outcome = click(&mut session, "e2");
        assert_eq!(
            outcome,
            Outcome::Selected {
                square: sq("e2"),
                targets: vec![sq("e3"), sq("e4")]
            }
        );
        assert_eq!(session.highlighted(), vec![sq("e3"), sq("e4")]);
        let outcome = click(&mut session, "e4");
        assert!(matches!(outcome, Outcome::Moved { to, .. } if to == sq("e4")));
        assert_eq!(session.selected(), None);
        assert_eq!(session.game().side_to_move(), Color::Black);
    }

    #[test]
    fn reclick_deselects_and_other_piece_switches() {
        let mut session = Session::default();
        click(&mut session, "e2");
        assert_eq!(click(&mut session, "e2"), Outcome::Deselected);
        click(&mut session, "e2");
        assert!(matches!(
            click(&mut session, "g1"),
            Outcome::Selected { square, .. } if square == sq("g1")
        ));
        assert_eq!(session.selected(), Some(sq("g1")));
    }

    #[test]
    fn invalid_clicks_are_ignored() {
        let mut session = Session::default();
        assert_eq!(
            click(&mut session, "e4"),
            Outcome::Ignored(IgnoreReason::InvalidSelection)
        );
        assert_eq!(
            click(&mut session, "e7"),
            Outcome::Ignored(IgnoreReason::InvalidSelection)
        );
        click(&mut session, "e2");
        assert_eq!(
            click(&mut session, "e5"),
            Outcome::Ignored(IgnoreReason::IllegalTarget)
        );
        // Selection survives an illegal target.
        assert_eq!(session.selected(), Some(sq("e2")));
        assert_eq!(session.game().move_count(), 0);
    }

    #[test]
    fn promotion_flow() {
        let game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", RulesConfig::default())
            .unwrap();
        let mut session = Session::new(game);
        click(&mut session, "a7");
        assert_eq!(
            click(&mut session, "a8"),
            Outcome::PromotionRequired {
                color: Color::White,
                square: Square::A8
            }
        );
        assert_eq!(
            click(&mut session, "e1"),
            Outcome::Ignored(IgnoreReason::PromotionPending)
        );
        assert_eq!(
            session.handle(Event::PromotionChosen(PieceKind::Pawn)),
            Outcome::Ignored(IgnoreReason::InvalidPromotionPiece)
        );
        let outcome = session.handle(Event::PromotionChosen(PieceKind::Rook));
        assert!(matches!(
            outcome,
            Outcome::Promoted { kind: PieceKind::Rook, .. }
        ));
        assert_eq!(
            session.handle(Event::PromotionChosen(PieceKind::Queen)),
            Outcome::Ignored(IgnoreReason::NoPromotionPending)
        );
    }

    #[test]
    fn game_over_ignores_clicks_until_reset() {
        let mut session = Session::default();
        for s in ["f2", "f3", "e7", "e5", "g2", "g4", "d8"] {
            click(&mut session, s);
        }
        let outcome = click(&mut session, "h4");
        assert!(matches!(
            outcome,
            Outcome::Moved {
                status: GameStatus::Over(GameResult::BlackWins),
                ..
            }
        ));
        assert_eq!(
            click(&mut session, "a2"),
            Outcome::Ignored(IgnoreReason::GameOver)
        );
        assert_eq!(session.handle(Event::ResetRequested), Outcome::Reset);
        assert!(matches!(click(&mut session, "a2"), Outcome::Selected { .. }));
    }

    #[test]
    fn draw_agreement() {
        let mut session = Session::default();
        assert_eq!(session.handle(Event::DrawAgreed), Outcome::DrawAgreed);
        assert_eq!(
            session.handle(Event::DrawAgreed),
            Outcome::Ignored(IgnoreReason::GameOver)
        );
    }

    #[test]
    fn shared_session_drops_overlapping_events() {
        let shared = SharedSession::default();
        {
            let _in_progress = shared.inner.borrow_mut();
            assert_eq!(
                shared.dispatch(Event::SquareClicked(sq("e2"))),
                Outcome::Ignored(IgnoreReason::Busy)
            );
            assert_eq!(shared.inspect(|s| s.selected()), None);
        }
        assert!(matches!(
            shared.dispatch(Event::SquareClicked(sq("e2"))),
            Outcome::Selected { .. }
        ));
        assert_eq!(shared.inspect(|s| s.selected()), Some(Some(sq("e2"))));
    }
}
