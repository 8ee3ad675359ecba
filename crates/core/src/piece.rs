//! The falling piece.
//!
//! A `Piece` is a value: moving or rotating produces a *candidate* and leaves
//! the original alone. Whether a candidate may replace the active piece is
//! decided by [`crate::collision`].

use serde::Serialize;

use crate::pieces::{shape, spawn_anchor, PieceShape};
use crate::types::{PieceKind, Pos, RotateDirection, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub anchor: Pos,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, anchor: Pos) -> Self {
        Self {
            kind,
            rotation,
            anchor,
        }
    }

    /// A piece in spawn orientation at the top centre of a grid.
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        Self::new(kind, Rotation::North, spawn_anchor(kind, grid_width))
    }

    pub fn shape(&self) -> &'static PieceShape {
        shape(self.kind, self.rotation)
    }

    /// Absolute grid positions of the four cells.
    pub fn cells(&self) -> [Pos; 4] {
        let offsets = *self.shape();
        offsets.map(|(drow, dcol)| self.anchor.offset(drow, dcol))
    }

    /// Candidate moved by `(drow, dcol)`.
    pub fn translated(&self, drow: i8, dcol: i8) -> Self {
        Self {
            anchor: self.anchor.offset(drow, dcol),
            ..*self
        }
    }

    /// Candidate rotated in place around the same anchor.
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }

    /// Lowest row index covered by the piece.
    pub fn bottom_row(&self) -> i8 {
        self.cells().iter().map(|p| p.row).max().unwrap_or(self.anchor.row)
    }
}
