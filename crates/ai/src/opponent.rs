//! The computer opponent.
//!
//! `Opponent` is an [`ActionSource`] exactly like the keyboard handler:
//! it never teleports the piece. A target placement is decided once, at
//! the Choose phase, and then executed one input at a time - rotations
//! first, then one horizontal step per call toward the target column,
//! then the drop. Both adjustments compare against the piece's actual
//! state rather than counting blindly: the session may hand over a
//! piece already rotated or offset (the spawn search deflects around
//! blocked cells) and may refuse a rotation or move outright.

use vs_tetris_core::{rotate_cw, template, ActionSource, GameSession, ShapeGrid};
use vs_tetris_types::{GameAction, GamePhase, PieceKind};

use crate::search::{choose_best_move, SEARCH_DEPTH};

#[derive(Debug, Clone, Copy)]
struct Plan {
    /// Orientation the piece must show before it heads for its column.
    target_shape: ShapeGrid,
    /// Remaining rotation attempts; bounds the retries when the session
    /// keeps abandoning a blocked rotation.
    rotation_budget: u8,
    target_col: i8,
    /// Column observed when the previous move was emitted; if it did not
    /// change, the move was blocked and the piece is dropped as-is.
    last_col: Option<i8>,
}

/// Heuristic-search opponent.
#[derive(Debug, Clone)]
pub struct Opponent {
    depth: u8,
    plan: Option<Plan>,
}

impl Opponent {
    pub fn new() -> Self {
        Self::with_depth(SEARCH_DEPTH)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self { depth, plan: None }
    }

    fn choose(&mut self, session: &GameSession) -> GameAction {
        let board = session.board(session.current_player());
        let pool = session.pieces_left();

        if let Some(placement) = choose_best_move(board, pool, self.depth) {
            let mut target_shape = template(placement.kind);
            for _ in 0..placement.rotations {
                rotate_cw(&mut target_shape);
            }
            self.plan = Some(Plan {
                target_shape,
                rotation_budget: 4,
                target_col: placement.col,
                last_col: None,
            });
            return GameAction::Choose(placement.kind);
        }

        // Nothing fits anywhere: pick any remaining kind and let the
        // state machine decide the outcome (normally Lose).
        self.plan = None;
        match PieceKind::ALL.into_iter().find(|k| pool[k.index()] > 0) {
            Some(kind) => GameAction::Choose(kind),
            None => GameAction::QueueEmpty,
        }
    }

    fn place(&mut self, session: &GameSession) -> GameAction {
        let Some(piece) = session.active() else {
            return GameAction::QueueEmpty;
        };
        let Some(plan) = self.plan.as_mut() else {
            return GameAction::Drop;
        };

        if piece.shape != plan.target_shape && plan.rotation_budget > 0 {
            plan.rotation_budget -= 1;
            plan.last_col = None;
            return GameAction::Rotate;
        }

        let col = piece.col;
        if plan.last_col == Some(col) {
            // The session refused our last step; stop pushing.
            return GameAction::Drop;
        }
        plan.last_col = Some(col);

        if col < plan.target_col {
            GameAction::MoveRight
        } else if col > plan.target_col {
            GameAction::MoveLeft
        } else {
            GameAction::Drop
        }
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSource for Opponent {
    fn next_action(&mut self, session: &GameSession) -> GameAction {
        match session.phase() {
            GamePhase::Choose => self.choose(session),
            GamePhase::Place => self.place(session),
            GamePhase::Cleared => GameAction::FinishClearing,
            GamePhase::Lose | GamePhase::Win => GameAction::QueueEmpty,
        }
    }
}
