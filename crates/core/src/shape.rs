//! Shape module - the 7 canonical tetromino templates and their rotation.
//!
//! A shape is a 4x4 boolean grid. Rotation works in place on the fixed
//! 16-cell buffer: the outer 12-cell ring and the inner 2x2 ring are each
//! cyclically permuted by one position, which amounts to a 90° clockwise
//! turn of the whole grid. Four applications return the original grid.

use vs_tetris_types::PieceKind;

/// 4x4 occupancy grid, row-major. `true` cells form the piece.
pub type ShapeGrid = [[bool; 4]; 4];

const O: bool = false;
const X: bool = true;

/// Canonical spawn orientation of each kind, indexed by `PieceKind::index`.
const TEMPLATES: [ShapeGrid; 7] = [
    // I
    [
        [O, X, O, O],
        [O, X, O, O],
        [O, X, O, O],
        [O, X, O, O],
    ],
    // T
    [
        [O, X, O, O],
        [O, X, X, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
    // J
    [
        [O, O, X, O],
        [O, O, X, O],
        [O, X, X, O],
        [O, O, O, O],
    ],
    // L
    [
        [O, X, O, O],
        [O, X, O, O],
        [O, X, X, O],
        [O, O, O, O],
    ],
    // S
    [
        [O, X, O, O],
        [O, X, X, O],
        [O, O, X, O],
        [O, O, O, O],
    ],
    // Z
    [
        [O, O, X, O],
        [O, X, X, O],
        [O, X, O, O],
        [O, O, O, O],
    ],
    // O
    [
        [O, O, O, O],
        [O, X, X, O],
        [O, X, X, O],
        [O, O, O, O],
    ],
];

/// Get a mutable copy of the canonical template for a piece kind.
pub fn template(kind: PieceKind) -> ShapeGrid {
    TEMPLATES[kind.index()]
}

/// Rotate a shape 90° clockwise, in place.
pub fn rotate_cw(shape: &mut ShapeGrid) {
    // Outer ring: each corner-to-corner run shifts by one cell.
    for i in 0..3 {
        let t = shape[0][i];
        shape[0][i] = shape[3 - i][0];
        shape[3 - i][0] = shape[3][3 - i];
        shape[3][3 - i] = shape[i][3];
        shape[i][3] = t;
    }
    // Inner 2x2 ring.
    let t = shape[1][1];
    shape[1][1] = shape[2][1];
    shape[2][1] = shape[2][2];
    shape[2][2] = shape[1][2];
    shape[1][2] = t;
}
