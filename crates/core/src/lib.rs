//! Simulation core - pure game logic with no I/O dependencies.
//!
//! Everything here is deterministic and allocation-light: fixed-size
//! boards and shapes, a small seeded RNG for the garbage transform, and
//! a state machine driven exclusively through [`GameSession::step`].

pub mod board;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shape;

pub use board::Board;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use session::{run_loop, ActionSource, GameSession};
pub use shape::{rotate_cw, template, ShapeGrid};
