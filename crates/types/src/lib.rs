//! Core types shared across the workspace.
//!
//! This crate contains pure data types and constants with no external
//! dependencies: piece kinds, board cells, game modes/phases and the
//! action vocabulary exchanged between the session core and its action
//! sources (keyboard or opponent AI).

/// Board dimensions.
pub const BOARD_ROWS: usize = 15;
pub const BOARD_COLS: usize = 10;

/// Pieces of each kind available to a player at session start.
/// Two-board modes share a single pool of twice this amount.
pub const STARTING_PIECES: u8 = 20;

/// Points awarded for clearing 1, 2, 3 or 4 lines at once.
pub const SCORE_PER_LINES: [u32; 4] = [1, 3, 6, 12];

/// Clearing at least this many lines at once sends garbage to the
/// opponent's board in two-board modes.
pub const GARBAGE_THRESHOLD: usize = 3;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    J,
    L,
    S,
    Z,
    O,
}

impl PieceKind {
    /// All kinds, in pool order (matches the per-kind counters).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::O,
    ];

    /// Index into per-kind arrays (piece pool, shape templates).
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::O => 6,
        }
    }

    /// Inverse of [`PieceKind::index`]; wraps out-of-range values.
    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % Self::ALL.len()]
    }

    /// Parse a piece kind from its selection key.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(PieceKind::I),
            't' => Some(PieceKind::T),
            'j' => Some(PieceKind::J),
            'l' => Some(PieceKind::L),
            's' => Some(PieceKind::S),
            'z' => Some(PieceKind::Z),
            'o' => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Selection key / display letter.
    pub fn as_char(self) -> char {
        match self {
            PieceKind::I => 'i',
            PieceKind::T => 't',
            PieceKind::J => 'j',
            PieceKind::L => 'l',
            PieceKind::S => 's',
            PieceKind::Z => 'z',
            PieceKind::O => 'o',
        }
    }
}

/// One cell of the board.
///
/// The board conflates logical occupancy with the value used for
/// presentation: committed blocks keep the kind of the piece that placed
/// them, and three transient markers exist purely so a frame can show
/// them. Only `Empty` vs everything-else matters for collision and line
/// logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Filled(PieceKind),
    /// Landing preview of the active piece (render projection only).
    Ghost,
    /// Row fully occupied, shown once before removal.
    Clearing,
    /// The spawn-collision overlay shown on the losing frame.
    Collision,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }
}

/// Which variant of the game a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Singleplayer,
    VsPlayer,
    VsAi,
}

impl GameMode {
    /// Two-board modes alternate turns and exchange garbage.
    pub fn is_versus(self) -> bool {
        matches!(self, GameMode::VsPlayer | GameMode::VsAi)
    }

    pub fn player_count(self) -> usize {
        if self.is_versus() {
            2
        } else {
            1
        }
    }
}

/// The named states the session can be in. Each phase accepts a distinct
/// subset of actions (see [`GameAction::phase`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// The current player must choose the next piece.
    Choose,
    /// The current player is moving the active piece into position.
    Place,
    /// One or more lines were just completed; shown for one frame before
    /// they are removed and scored.
    Cleared,
    Lose,
    Win,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Lose | GamePhase::Win)
    }
}

/// A player action, as produced by an action source (keyboard handler or
/// opponent AI). Every variant except the `QueueEmpty` sentinel is valid
/// in exactly one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Sentinel: the source has nothing more to offer this frame.
    QueueEmpty,
    Choose(PieceKind),
    MoveLeft,
    MoveRight,
    Rotate,
    Drop,
    FinishClearing,
}

impl GameAction {
    /// The phase this action belongs to (`None` for the sentinel).
    ///
    /// Sources must only emit actions matching the session's current
    /// phase; the session checks this as a consistency guard.
    pub fn phase(self) -> Option<GamePhase> {
        match self {
            GameAction::QueueEmpty => None,
            GameAction::Choose(_) => Some(GamePhase::Choose),
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::Rotate | GameAction::Drop => {
                Some(GamePhase::Place)
            }
            GameAction::FinishClearing => Some(GamePhase::Cleared),
        }
    }
}
