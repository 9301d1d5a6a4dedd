//! Opponent decision engine.
//!
//! Splits into a board evaluator ([`heuristic`]), a bounded-depth
//! placement search ([`search`]) and the incremental action source that
//! replays the chosen placement through the same interface a human
//! player uses ([`opponent`]).

pub mod heuristic;
pub mod opponent;
pub mod search;

pub use heuristic::{compute_features, evaluate, evaluate_with, BoardFeatures, Weights};
pub use opponent::Opponent;
pub use search::{choose_best_move, Placement, FUTURE_DAMPING, SEARCH_DEPTH};
