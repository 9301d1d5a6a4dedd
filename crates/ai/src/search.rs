//! Placement search.
//!
//! Enumerates every legal (kind, rotation, column) placement for the
//! pieces still in the pool, simulates the drop on a scratch copy of the
//! board and keeps the best-scoring candidate. An optional fixed-depth
//! lookahead simulates the follow-up placement too, discounted by a
//! damping factor. Ties keep the first candidate found.

use vs_tetris_core::{Board, Piece};
use vs_tetris_types::{Cell, PieceKind, BOARD_COLS};

use crate::heuristic::{evaluate_with, Weights};

/// Default lookahead depth: one extra placement beyond the immediate one.
pub const SEARCH_DEPTH: u8 = 1;

/// Discount applied to the lookahead score.
pub const FUTURE_DAMPING: f64 = 0.5;

/// A chosen placement: which piece to take, how many clockwise rotations
/// to apply and the target origin column of its 4x4 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: PieceKind,
    pub rotations: u8,
    pub col: i8,
}

/// Pick the best placement for the current board and piece pool, or
/// `None` when no piece in the pool has any legal placement (the state
/// machine will reach Lose on its own in that case).
pub fn choose_best_move(
    board: &Board,
    pieces_left: &[u8; 7],
    depth: u8,
) -> Option<Placement> {
    search(board, pieces_left, depth, &Weights::default()).map(|(placement, _)| placement)
}

/// Like [`choose_best_move`] with explicit weights (used by tests).
pub fn choose_best_move_with(
    board: &Board,
    pieces_left: &[u8; 7],
    depth: u8,
    weights: &Weights,
) -> Option<Placement> {
    search(board, pieces_left, depth, weights).map(|(placement, _)| placement)
}

fn search(
    board: &Board,
    pieces_left: &[u8; 7],
    depth: u8,
    weights: &Weights,
) -> Option<(Placement, f64)> {
    let mut best: Option<(Placement, f64)> = None;

    for kind in PieceKind::ALL {
        if pieces_left[kind.index()] == 0 {
            continue;
        }

        let mut proto = Piece::new(kind);
        for rotations in 0..4u8 {
            for col in -3..BOARD_COLS as i8 {
                let mut piece = proto;
                piece.col = col;
                piece.lift();
                if board.collides(&piece) {
                    // No room to even spawn here; skip the candidate.
                    continue;
                }

                let mut scratch = board.clone();
                piece.hard_drop(&scratch);
                scratch.place(&piece, Cell::Filled(kind));

                let mut score = evaluate_with(&scratch, weights);
                if depth > 0 {
                    scratch.mark_cleared_lines();
                    scratch.remove_cleared_lines();
                    let mut remaining = *pieces_left;
                    remaining[kind.index()] -= 1;
                    if let Some((_, future)) = search(&scratch, &remaining, depth - 1, weights) {
                        score += FUTURE_DAMPING * future;
                    }
                }

                // Strict comparison: the first of equal candidates wins.
                match best {
                    Some((_, top)) if score <= top => {}
                    _ => best = Some((Placement { kind, rotations, col }, score)),
                }
            }
            proto.rotate_cw();
        }
    }

    best
}
