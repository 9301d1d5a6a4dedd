//! Board module - the 15x10 playing field.
//!
//! Cells are stored in a flat array for cache locality and zero
//! allocation. Coordinates are (row, col) with row 0 at the top. The
//! board holds "paint" values ([`Cell`]) whose distinction from plain
//! occupancy only matters when a frame is rendered; collision and line
//! logic look at empty vs non-empty alone.

use arrayvec::ArrayVec;

use vs_tetris_types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

use crate::piece::Piece;
use crate::rng::SimpleRng;

/// Total number of cells on the board.
const BOARD_SIZE: usize = BOARD_ROWS * BOARD_COLS;

/// The playing field - 15 rows x 10 columns in row-major flat storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col), or `None` if out of bounds.
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
            return None;
        }
        Some(row as usize * BOARD_COLS + col as usize)
    }

    /// Get the cell at (row, col); `None` if out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set the cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (row, col) holds a block (out of bounds counts as free).
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(cell) if cell.is_occupied())
    }

    /// Check whether the piece, at its current position, overlaps an
    /// occupied cell or sticks out of the board.
    ///
    /// Only filled shape cells are tested: empty corners of the 4x4
    /// bounding box may hang off-board without colliding, which is what
    /// lets a freshly lifted piece sit partially above row 0.
    pub fn collides(&self, piece: &Piece) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !piece.shape[i][j] {
                    continue;
                }
                let row = piece.row + i as i8;
                let col = piece.col + j as i8;
                match self.get(row, col) {
                    None => return true,
                    Some(cell) if cell.is_occupied() => return true,
                    Some(_) => {}
                }
            }
        }
        false
    }

    /// Unconditionally paint `value` into every board cell covered by a
    /// filled cell of the piece's shape.
    ///
    /// Used to commit a landed piece (`Cell::Filled`), to stamp render
    /// overlays (`Cell::Ghost`, `Cell::Collision`) and to erase
    /// (`Cell::Empty`). The caller must ensure no filled shape cell maps
    /// out of bounds.
    pub fn place(&mut self, piece: &Piece, value: Cell) {
        for i in 0..4 {
            for j in 0..4 {
                if piece.shape[i][j] {
                    let ok = self.set(piece.row + i as i8, piece.col + j as i8, value);
                    debug_assert!(ok, "filled shape cell painted out of bounds");
                }
            }
        }
    }

    /// Whether every cell of row `row` is occupied.
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_ROWS {
            return false;
        }
        let start = row * BOARD_COLS;
        self.cells[start..start + BOARD_COLS]
            .iter()
            .all(|cell| cell.is_occupied())
    }

    /// Overwrite every full row with the `Clearing` marker and return the
    /// marked row indices (top to bottom). Rows are not removed yet: the
    /// next frame shows them marked before they disappear.
    ///
    /// A single drop completes at most 4 rows by itself, but the garbage
    /// transform can leave additional full rows on the board, so the
    /// capacity covers every row.
    pub fn mark_cleared_lines(&mut self) -> ArrayVec<usize, BOARD_ROWS> {
        let mut marked = ArrayVec::new();
        for row in 0..BOARD_ROWS {
            if self.is_row_full(row) {
                let start = row * BOARD_COLS;
                self.cells[start..start + BOARD_COLS].fill(Cell::Clearing);
                marked.push(row);
            }
        }
        marked
    }

    /// Excise every row previously marked by [`Board::mark_cleared_lines`]
    /// (detected by its first cell), shifting everything above it down by
    /// one and zero-filling the freed top row. Handles multiple
    /// non-contiguous marked rows in one pass.
    pub fn remove_cleared_lines(&mut self) {
        let mut y = BOARD_ROWS;
        while y > 0 {
            let row = y - 1;
            if self.cells[row * BOARD_COLS] == Cell::Clearing {
                self.cells.copy_within(0..row * BOARD_COLS, BOARD_COLS);
                self.cells[..BOARD_COLS].fill(Cell::Empty);
                // Rows above have shifted into `row`; re-check it.
            } else {
                y -= 1;
            }
        }
    }

    /// Garbage attack: invert the occupancy of the bottom `rows` rows.
    /// Occupied cells are cleared; empty cells are filled with a random
    /// piece-kind marker.
    pub fn invert_bottom_rows(&mut self, rows: usize, rng: &mut SimpleRng) {
        let rows = rows.min(BOARD_ROWS);
        let start = (BOARD_ROWS - rows) * BOARD_COLS;
        for cell in &mut self.cells[start..] {
            *cell = if cell.is_occupied() {
                Cell::Empty
            } else {
                Cell::Filled(PieceKind::from_index(rng.next_range(7) as usize))
            };
        }
    }

    /// Reference to the flat cell array (row-major).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
