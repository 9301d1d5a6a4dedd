//! Heuristic board evaluation.
//!
//! The evaluator reduces a board to four classic stacking features
//! (column heights, complete rows, covered holes, surface bumpiness) and
//! combines them linearly. The magnitudes follow the well-known
//! GA-tuned weights, extended with a max-height term and a flat bonus
//! for clearing 3+ rows at once (which feeds the garbage attack in
//! versus games). Exact values are tunable, not structural.

use vs_tetris_core::Board;
use vs_tetris_types::{BOARD_COLS, BOARD_ROWS};

/// Aggregated stacking features of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFeatures {
    /// Stack height per column: distance from the first occupied cell
    /// down to the floor (0 for an empty column).
    pub heights: [u32; BOARD_COLS],
    pub max_height: u32,
    pub aggregate_height: u32,
    /// Rows with every cell occupied (still present, not yet removed).
    pub full_rows: u32,
    /// Empty cells with at least one occupied cell above them in the
    /// same column.
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub bumpiness: u32,
}

/// Linear evaluation weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub max_height: f64,
    pub aggregate_height: f64,
    pub full_rows: f64,
    /// Flat bonus added once when 3 or more rows complete together.
    pub multi_clear_bonus: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            max_height: -0.20,
            aggregate_height: -0.510066,
            full_rows: 0.760666,
            multi_clear_bonus: 2.0,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

/// Compute the stacking features of a board.
pub fn compute_features(board: &Board) -> BoardFeatures {
    let mut heights = [0u32; BOARD_COLS];
    let mut holes = 0u32;

    for col in 0..BOARD_COLS {
        let mut seen_block = false;
        for row in 0..BOARD_ROWS {
            if board.is_occupied(row as i8, col as i8) {
                if !seen_block {
                    heights[col] = (BOARD_ROWS - row) as u32;
                    seen_block = true;
                }
            } else if seen_block {
                holes += 1;
            }
        }
    }

    let full_rows = (0..BOARD_ROWS).filter(|&row| board.is_row_full(row)).count() as u32;
    let max_height = heights.iter().copied().max().unwrap_or(0);
    let aggregate_height = heights.iter().sum();
    let bumpiness = heights
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum();

    BoardFeatures {
        heights,
        max_height,
        aggregate_height,
        full_rows,
        holes,
        bumpiness,
    }
}

/// Score a board with explicit weights. Higher is better.
pub fn evaluate_with(board: &Board, weights: &Weights) -> f64 {
    let f = compute_features(board);
    let mut score = weights.max_height * f.max_height as f64
        + weights.aggregate_height * f.aggregate_height as f64
        + weights.full_rows * f.full_rows as f64
        + weights.holes * f.holes as f64
        + weights.bumpiness * f.bumpiness as f64;
    if f.full_rows >= 3 {
        score += weights.multi_clear_bonus;
    }
    score
}

/// Score a board with the default weights.
pub fn evaluate(board: &Board) -> f64 {
    evaluate_with(board, &Weights::default())
}
