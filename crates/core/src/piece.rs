//! Piece module - a single falling piece and its basic transforms
//!
//! A piece is pure data: kind, anchor position and rotation index. It knows
//! nothing about the grid; legality is decided by [`Grid::fits`](crate::Grid::fits).

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::shapes::{self, Mask};
use crate::types::{PieceKind, SPAWN_POSITION};

/// A piece on (or above) the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    /// Column of the bounding box's left edge
    pub x: i8,
    /// Row of the bounding box's top edge
    pub y: i8,
    pub rotation: u8,
}

impl Piece {
    /// Fresh piece of `kind` in its default spawn pose.
    ///
    /// This is the kind-indexed factory used for every spawn and hold swap.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
            rotation: 0,
        }
    }

    /// Occupancy mask for the current rotation
    pub fn mask(&self) -> Mask {
        shapes::shape(self.kind, self.rotation)
    }

    /// Absolute `(x, y)` grid coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        let mask = self.mask();
        let offsets: ArrayVec<(i8, i8), 4> = shapes::cells(&mask).collect();
        offsets.into_iter().map(move |(dx, dy)| (x + dx, y + dy))
    }

    pub fn translate(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    /// Gravity step: one row down
    pub fn fall_one_row(&mut self) {
        self.translate(0, 1);
    }

    /// Counter-clockwise. A no-op for the square, which has one state.
    pub fn rotate_left(&mut self) {
        if self.kind == PieceKind::O {
            return;
        }
        let count = shapes::rotation_count(self.kind);
        self.rotation = (self.rotation + count - 1) % count;
    }

    /// Clockwise. A no-op for the square, which has one state.
    pub fn rotate_right(&mut self) {
        if self.kind == PieceKind::O {
            return;
        }
        let count = shapes::rotation_count(self.kind);
        self.rotation = (self.rotation + 1) % count;
    }
}
