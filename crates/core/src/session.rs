//! Session module - the game state machine.
//!
//! `GameSession` owns the complete state of one game (boards, active
//! piece, scores, the shared piece pool) and advances it exclusively in
//! response to [`GameAction`]s pulled from action sources. Each action is
//! intrinsically tagged with the phase it belongs to; feeding an action
//! to the wrong phase is a bug in the source and is asserted in debug
//! builds, ignored (never applied) in release.

use vs_tetris_types::{
    Cell, GameAction, GameMode, GamePhase, PieceKind, BOARD_COLS, GARBAGE_THRESHOLD,
    SCORE_PER_LINES, STARTING_PIECES,
};

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::SimpleRng;

/// Something that produces actions for the current player: the keyboard
/// handler and the opponent AI implement this with an identical contract.
///
/// A source may yield several actions per frame; it signals the end of
/// the frame with [`GameAction::QueueEmpty`]. Every non-sentinel action
/// must match the session's current phase.
pub trait ActionSource {
    fn next_action(&mut self, session: &GameSession) -> GameAction;
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    phase: GamePhase,
    boards: [Board; 2],
    active: Option<Piece>,
    scores: [u32; 2],
    /// Remaining pieces per kind, indexed by `PieceKind::index`. A single
    /// pool shared by both players in two-board modes.
    pieces_left: [u8; 7],
    /// Lines completed by the last drop, pending acknowledgement.
    lines_cleared: usize,
    current_player: usize,
    rng: SimpleRng,
}

impl GameSession {
    /// Create a session with empty boards and a full piece pool.
    /// The pool is doubled in two-board modes.
    pub fn new(mode: GameMode, seed: u32) -> Self {
        let per_kind = if mode.is_versus() {
            STARTING_PIECES * 2
        } else {
            STARTING_PIECES
        };

        Self {
            mode,
            phase: GamePhase::Choose,
            boards: [Board::new(), Board::new()],
            active: None,
            scores: [0, 0],
            pieces_left: [per_kind; 7],
            lines_cleared: 0,
            current_player: 0,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn board(&self, player: usize) -> &Board {
        &self.boards[player]
    }

    pub fn score(&self, player: usize) -> u32 {
        self.scores[player]
    }

    pub fn pieces_left(&self) -> &[u8; 7] {
        &self.pieces_left
    }

    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Mutable board access, for scenario setup in tests and tools.
    pub fn board_mut(&mut self, player: usize) -> &mut Board {
        &mut self.boards[player]
    }

    /// Replace the piece pool, for scenario setup in tests and tools.
    pub fn set_pieces_left(&mut self, pool: [u8; 7]) {
        self.pieces_left = pool;
    }

    /// The winning player of a finished versus game, if any.
    ///
    /// On `Lose` the player whose piece could not spawn forfeits; on
    /// `Win` (pool exhausted) the higher score wins. `None` for
    /// singleplayer sessions, unfinished games and draws.
    pub fn winner(&self) -> Option<usize> {
        if !self.mode.is_versus() {
            return None;
        }
        match self.phase {
            GamePhase::Lose => Some(1 - self.current_player),
            GamePhase::Win => match self.scores[0].cmp(&self.scores[1]) {
                std::cmp::Ordering::Greater => Some(0),
                std::cmp::Ordering::Less => Some(1),
                std::cmp::Ordering::Equal => None,
            },
            _ => None,
        }
    }

    /// Apply one action and advance the state machine.
    ///
    /// Returns whether another action may be consumed before the next
    /// render: true after choose/move/rotate, false after a drop (the
    /// result must be shown), a clear acknowledgement, the `QueueEmpty`
    /// sentinel, or once a terminal phase is reached.
    pub fn step(&mut self, action: GameAction) -> bool {
        if action == GameAction::QueueEmpty {
            return false;
        }

        debug_assert_eq!(
            action.phase(),
            Some(self.phase),
            "action {action:?} does not belong to phase {:?}",
            self.phase
        );
        if action.phase() != Some(self.phase) {
            return false;
        }

        match action {
            GameAction::Choose(kind) => self.handle_choose(kind),
            GameAction::MoveLeft => self.nudge(-1),
            GameAction::MoveRight => self.nudge(1),
            GameAction::Rotate => self.handle_rotate(),
            GameAction::Drop => self.handle_drop(),
            GameAction::FinishClearing => self.handle_finish_clearing(),
            GameAction::QueueEmpty => unreachable!(),
        }

        let pauses = matches!(action, GameAction::Drop | GameAction::FinishClearing);
        !pauses && !self.phase.is_terminal()
    }

    /// Choose the next piece. Silently keeps the Choose phase if the
    /// pool for this kind is empty; transitions to Lose if the piece can
    /// not be fitted anywhere along the top of the board.
    fn handle_choose(&mut self, kind: PieceKind) {
        let idx = kind.index();
        if self.pieces_left[idx] == 0 {
            return;
        }
        self.pieces_left[idx] -= 1;

        match self.fit_spawn(kind) {
            Some(piece) => {
                self.active = Some(piece);
                self.phase = GamePhase::Place;
            }
            None => {
                // Keep the colliding centered piece for the losing frame.
                let mut piece = Piece::new(kind);
                piece.lift();
                self.active = Some(piece);
                self.phase = GamePhase::Lose;
            }
        }
    }

    /// Placement-fitting search: try the board's horizontal center first,
    /// then columns spiralling outwards, each with all 4 rotations.
    fn fit_spawn(&self, kind: PieceKind) -> Option<Piece> {
        let board = &self.boards[self.current_player];
        let center = BOARD_COLS as i8 / 2 - 2;

        for offset in 0..=(BOARD_COLS as i8 + 2) {
            for dir in [-1i8, 1] {
                if offset == 0 && dir == 1 {
                    continue;
                }
                let col = center + dir * offset;
                if !(-3..BOARD_COLS as i8).contains(&col) {
                    continue;
                }

                let mut candidate = Piece::new(kind);
                candidate.col = col;
                for _ in 0..4 {
                    let mut lifted = candidate;
                    lifted.lift();
                    if !board.collides(&lifted) {
                        return Some(lifted);
                    }
                    candidate.rotate_cw();
                }
            }
        }
        None
    }

    /// Move the active piece horizontally by one, reverting on collision.
    fn nudge(&mut self, dx: i8) {
        let board = &self.boards[self.current_player];
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        piece.col += dx;
        if board.collides(piece) {
            piece.col -= dx;
        }
    }

    /// Rotate the active piece, lift it back to the top and kick it away
    /// from a violated board edge. If no non-colliding position exists
    /// the rotation is abandoned wholesale and the piece is unchanged.
    fn handle_rotate(&mut self) {
        let board = &self.boards[self.current_player];
        let Some(active) = self.active else {
            return;
        };

        let mut rotated = active;
        rotated.rotate_cw();
        rotated.lift();

        if board.collides(&rotated) {
            if rotated.col < 0 {
                while rotated.col < 0 && board.collides(&rotated) {
                    rotated.col += 1;
                }
            } else if rotated.col + 4 > BOARD_COLS as i8 {
                while rotated.col + 4 > BOARD_COLS as i8 && board.collides(&rotated) {
                    rotated.col -= 1;
                }
            }
        }

        if !board.collides(&rotated) {
            self.active = Some(rotated);
        }
    }

    /// Hard-drop and commit the active piece, then mark completed lines.
    fn handle_drop(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        let board = &mut self.boards[self.current_player];
        piece.hard_drop(board);
        board.place(&piece, Cell::Filled(piece.kind));

        self.lines_cleared = board.mark_cleared_lines().len();
        if self.lines_cleared > 0 {
            self.phase = GamePhase::Cleared;
        } else if self.pool_exhausted() {
            self.phase = GamePhase::Win;
        } else {
            self.phase = GamePhase::Choose;
            self.end_turn();
        }
    }

    /// Compact the marked lines, award points and, on a big enough
    /// clear, punish the opponent's board with garbage.
    fn handle_finish_clearing(&mut self) {
        let player = self.current_player;
        self.boards[player].remove_cleared_lines();

        if self.lines_cleared > 0 {
            let idx = (self.lines_cleared - 1).min(SCORE_PER_LINES.len() - 1);
            self.scores[player] += SCORE_PER_LINES[idx];
        }

        if self.mode.is_versus() && self.lines_cleared >= GARBAGE_THRESHOLD {
            let rows = self.lines_cleared;
            self.boards[1 - player].invert_bottom_rows(rows, &mut self.rng);
        }

        self.lines_cleared = 0;
        if self.pool_exhausted() {
            self.phase = GamePhase::Win;
        } else {
            self.phase = GamePhase::Choose;
            self.end_turn();
        }
    }

    fn end_turn(&mut self) {
        if self.mode.is_versus() {
            self.current_player = 1 - self.current_player;
        }
    }

    fn pool_exhausted(&self) -> bool {
        self.pieces_left.iter().all(|&count| count == 0)
    }

    /// Side-effect-free render projection of a player's board.
    ///
    /// Overlays the active piece and its ghost landing preview (Place
    /// phase) or the collision marker (Lose phase) on a copy, leaving
    /// the live board untouched. Matching the classic presentation, the
    /// active piece itself is only drawn when it is 3 or more rows above
    /// its landing position; closer than that only the ghost shows.
    pub fn display_board(&self, player: usize) -> Board {
        let mut board = self.boards[player].clone();
        if player != self.current_player {
            return board;
        }

        match self.phase {
            GamePhase::Place => {
                if let Some(active) = &self.active {
                    let mut ghost = *active;
                    ghost.hard_drop(&board);
                    if ghost.row - active.row >= 3 {
                        board.place(active, Cell::Filled(active.kind));
                    }
                    board.place(&ghost, Cell::Ghost);
                }
            }
            GamePhase::Lose => {
                if let Some(active) = &self.active {
                    board.place(active, Cell::Collision);
                }
            }
            _ => {}
        }
        board
    }
}

/// Drive a session to completion: render, then consume as many actions
/// as the source allows before rendering again.
///
/// `render` may stop the loop early by returning `Ok(false)` (e.g. the
/// player asked to quit). The final terminal frame is rendered before
/// the loop exits.
pub fn run_loop<E>(
    session: &mut GameSession,
    mut next_action: impl FnMut(&GameSession) -> GameAction,
    mut render: impl FnMut(&GameSession) -> Result<bool, E>,
) -> Result<(), E> {
    loop {
        if !render(session)? {
            return Ok(());
        }
        if session.is_over() {
            return Ok(());
        }
        while session.step(next_action(session)) {}
    }
}
