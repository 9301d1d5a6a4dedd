//! Piece module - the active tetromino and its movement primitives.

use vs_tetris_types::{PieceKind, BOARD_COLS};

use crate::board::Board;
use crate::shape::{self, ShapeGrid};

/// The piece currently in play: its kind, a mutable working copy of the
/// shape (rotated in place) and the board position of the shape grid's
/// top-left corner.
///
/// `row`/`col` may be negative or run past the board edge; the state is
/// legal as long as every *filled* shape cell maps to an in-bounds board
/// cell. Empty corners of the 4x4 grid are allowed to hang off-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeGrid,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// Create a piece of the given kind at the board's horizontal center,
    /// in the canonical spawn orientation.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: shape::template(kind),
            row: 0,
            col: BOARD_COLS as i8 / 2 - 2,
        }
    }

    /// Rotate the working shape 90° clockwise in place.
    pub fn rotate_cw(&mut self) {
        shape::rotate_cw(&mut self.shape);
    }

    /// Align the piece's topmost filled cell with board row 0, keeping the
    /// column fixed. Rows of empty cells at the top of the shape grid push
    /// the origin above the board (a legal state, see struct docs).
    pub fn lift(&mut self) {
        self.row = 0;
        for i in 0..3 {
            if self.shape[i].iter().any(|&c| c) {
                return;
            }
            self.row -= 1;
        }
    }

    /// Hard drop: keep the column fixed and advance the row until the
    /// piece rests on the stack or the floor.
    pub fn hard_drop(&mut self, board: &Board) {
        loop {
            self.row += 1;
            if board.collides(self) {
                self.row -= 1;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_tetris_types::{Cell, BOARD_ROWS};

    #[test]
    fn test_new_piece_spawns_centered() {
        let piece = Piece::new(PieceKind::O);
        assert_eq!(piece.col, 3);
        assert_eq!(piece.shape, shape::template(PieceKind::O));
    }

    #[test]
    fn test_lift_skips_empty_top_rows() {
        // O template has an empty first row, so lifting raises it by one.
        let mut piece = Piece::new(PieceKind::O);
        piece.lift();
        assert_eq!(piece.row, -1);

        // I template is filled from row 0.
        let mut piece = Piece::new(PieceKind::I);
        piece.lift();
        assert_eq!(piece.row, 0);
    }

    #[test]
    fn test_hard_drop_rests_on_floor() {
        let board = Board::new();
        let mut piece = Piece::new(PieceKind::O);
        piece.lift();
        piece.hard_drop(&board);

        // O blocks live in shape rows 1-2; the bottom row of the piece
        // must land on the last board row.
        assert_eq!(piece.row + 2, BOARD_ROWS as i8 - 1);
        assert!(!board.collides(&piece));

        piece.row += 1;
        assert!(board.collides(&piece));
    }

    #[test]
    fn test_hard_drop_rests_on_stack() {
        let mut board = Board::new();
        // One block in the O piece's landing columns, three rows up.
        board.set(BOARD_ROWS as i8 - 3, 4, Cell::Filled(PieceKind::T));

        let mut piece = Piece::new(PieceKind::O);
        piece.lift();
        piece.hard_drop(&board);

        // Bottom shape row (index 2) rests directly above the block.
        assert_eq!(piece.row + 2, BOARD_ROWS as i8 - 4);
    }
}
