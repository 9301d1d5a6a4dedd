//! Shape and piece behavior through the public facade.

use vs_tetris::core::{rotate_cw, template, Board, Piece};
use vs_tetris::types::{PieceKind, BOARD_ROWS};

fn block_count(shape: &[[bool; 4]; 4]) -> usize {
    shape.iter().flatten().filter(|&&c| c).count()
}

#[test]
fn every_kind_has_four_blocks() {
    for kind in PieceKind::ALL {
        assert_eq!(block_count(&template(kind)), 4, "{kind:?}");
    }
}

#[test]
fn four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let original = template(kind);
        let mut shape = original;
        for _ in 0..4 {
            rotate_cw(&mut shape);
            assert_eq!(block_count(&shape), 4, "{kind:?} lost blocks mid-turn");
        }
        assert_eq!(shape, original, "{kind:?}");
    }
}

#[test]
fn vertical_i_turns_horizontal() {
    // The I template stands in shape column 1; one clockwise turn lays
    // it flat across shape row 1.
    let mut shape = template(PieceKind::I);
    rotate_cw(&mut shape);
    assert_eq!(shape[1], [true; 4]);
    assert_eq!(block_count(&shape), 4);
}

#[test]
fn o_piece_spawn_lift_drop() {
    // The O template leaves its first shape row empty, so a lifted O
    // starts with its origin one row above the board, and a hard drop
    // from there rests its blocks on rows 13 and 14.
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::O);
    piece.lift();
    assert_eq!(piece.row, -1);
    assert!(!board.collides(&piece));

    piece.hard_drop(&board);
    assert_eq!(piece.row + 2, BOARD_ROWS as i8 - 1);
}

#[test]
fn rotation_keeps_the_origin() {
    let mut piece = Piece::new(PieceKind::T);
    let (row, col) = (piece.row, piece.col);
    piece.rotate_cw();
    assert_eq!((piece.row, piece.col), (row, col));
    assert_eq!(block_count(&piece.shape), 4);
}
