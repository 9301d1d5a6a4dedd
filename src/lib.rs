//! vs-tetris (workspace facade crate).
//!
//! This package exposes the `vs_tetris::{core,ai,term,types}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use vs_tetris_ai as ai;
pub use vs_tetris_core as core;
pub use vs_tetris_term as term;
pub use vs_tetris_types as types;
