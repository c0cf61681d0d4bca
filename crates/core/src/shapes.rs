//! Shapes module - the rotation masks of every piece kind
//!
//! Each rotation state is a 4x4 occupancy mask relative to the piece's anchor
//! (top-left of the bounding box). Row 0 is the top row; within a row,
//! column 0 is the leftmost cell. Masks are written as one nibble per row,
//! most significant bit first, so `0b0110` fills columns 1 and 2.
//!
//! Rotation counts differ per kind: the straight bar and both snakes toggle
//! between two states, the square has a single state, and J, L and T have
//! four states ordered clockwise.

use crate::types::PieceKind;

/// Side length of the bounding box
pub const MASK_SIZE: usize = 4;

/// 4x4 occupancy mask, indexed `[row][col]`
pub type Mask = [[bool; MASK_SIZE]; MASK_SIZE];

const fn mask(rows: [u8; MASK_SIZE]) -> Mask {
    let mut out = [[false; MASK_SIZE]; MASK_SIZE];
    let mut r = 0;
    while r < MASK_SIZE {
        let mut c = 0;
        while c < MASK_SIZE {
            out[r][c] = rows[r] & (0b1000 >> c) != 0;
            c += 1;
        }
        r += 1;
    }
    out
}

const I_SHAPES: [Mask; 2] = [
    mask([0b0000, 0b1111, 0b0000, 0b0000]),
    mask([0b0010, 0b0010, 0b0010, 0b0010]),
];

const O_SHAPES: [Mask; 1] = [mask([0b0110, 0b0110, 0b0000, 0b0000])];

const T_SHAPES: [Mask; 4] = [
    mask([0b0100, 0b1110, 0b0000, 0b0000]),
    mask([0b0100, 0b0110, 0b0100, 0b0000]),
    mask([0b0000, 0b1110, 0b0100, 0b0000]),
    mask([0b0100, 0b1100, 0b0100, 0b0000]),
];

const S_SHAPES: [Mask; 2] = [
    mask([0b0110, 0b1100, 0b0000, 0b0000]),
    mask([0b1000, 0b1100, 0b0100, 0b0000]),
];

const Z_SHAPES: [Mask; 2] = [
    mask([0b1100, 0b0110, 0b0000, 0b0000]),
    mask([0b0010, 0b0110, 0b0100, 0b0000]),
];

const J_SHAPES: [Mask; 4] = [
    mask([0b1000, 0b1110, 0b0000, 0b0000]),
    mask([0b0110, 0b0100, 0b0100, 0b0000]),
    mask([0b0000, 0b1110, 0b0010, 0b0000]),
    mask([0b0100, 0b0100, 0b1100, 0b0000]),
];

const L_SHAPES: [Mask; 4] = [
    mask([0b0010, 0b1110, 0b0000, 0b0000]),
    mask([0b0100, 0b0100, 0b0110, 0b0000]),
    mask([0b0000, 0b1110, 0b1000, 0b0000]),
    mask([0b1100, 0b0100, 0b0100, 0b0000]),
];

fn shapes_of(kind: PieceKind) -> &'static [Mask] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Number of distinct rotation states for a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    shapes_of(kind).len() as u8
}

/// Mask for a kind at a rotation index (taken modulo the rotation count)
pub fn shape(kind: PieceKind, rotation: u8) -> Mask {
    let shapes = shapes_of(kind);
    shapes[rotation as usize % shapes.len()]
}

/// Occupied `(col, row)` offsets of a mask, in row-major order
pub fn cells(mask: &Mask) -> impl Iterator<Item = (i8, i8)> + '_ {
    mask.iter().enumerate().flat_map(|(row, cols)| {
        cols.iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(col, _)| (col as i8, row as i8))
    })
}
