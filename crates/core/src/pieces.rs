//! Pieces module - static tetromino geometry
//!
//! Every (kind, rotation) pair maps to four `(row, col)` offsets inside the
//! kind's bounding box (4x4 for I and O, 3x3 for the rest). The tables are
//! plain data; nothing rotates cells arithmetically.
//!
//! The optional SRS kick tables follow https://tetris.wiki/Super_Rotation_System
//! converted to `(drow, dcol)` with rows growing downward.

use arrayvec::ArrayVec;

use crate::error::ShapeTableError;
use crate::types::{PieceKind, Pos, RotateDirection, Rotation};

/// Offset of a single cell relative to the piece anchor: `(row, col)`
pub type CellOffset = (i8, i8);

/// Four cell offsets
pub type PieceShape = [CellOffset; 4];

/// Shape table indexed by `[kind.index()][rotation.index()]`.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
    ],
    // O
    [
        [(0, 1), (0, 2), (1, 1), (1, 2)],
        [(0, 1), (0, 2), (1, 1), (1, 2)],
        [(0, 1), (0, 2), (1, 1), (1, 2)],
        [(0, 1), (0, 2), (1, 1), (1, 2)],
    ],
    // T
    [
        [(0, 1), (1, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 1)],
        [(0, 1), (1, 0), (1, 1), (2, 1)],
    ],
    // S
    [
        [(0, 1), (0, 2), (1, 0), (1, 1)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 1), (1, 2), (2, 0), (2, 1)],
        [(0, 0), (1, 0), (1, 1), (2, 1)],
    ],
    // Z
    [
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(0, 2), (1, 1), (1, 2), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(0, 1), (1, 0), (1, 1), (2, 0)],
    ],
    // J
    [
        [(0, 0), (1, 0), (1, 1), (1, 2)],
        [(0, 1), (0, 2), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 0), (2, 1)],
    ],
    // L
    [
        [(0, 2), (1, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (1, 2), (2, 0)],
        [(0, 0), (0, 1), (1, 1), (2, 1)],
    ],
];

/// Shape offsets for a kind in a rotation
pub fn shape(kind: PieceKind, rotation: Rotation) -> &'static PieceShape {
    &SHAPES[kind.index()][rotation.index()]
}

/// Side length of the kind's bounding box.
pub fn box_size(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I | PieceKind::O => 4,
        _ => 3,
    }
}

/// Spawn anchor for a kind on a grid of the given width.
///
/// Horizontally centred; vertically offset so the top row of the spawn
/// (North) orientation sits on grid row 0.
pub fn spawn_anchor(kind: PieceKind, grid_width: u8) -> Pos {
    let top = shape(kind, Rotation::North)
        .iter()
        .map(|&(row, _)| row)
        .min()
        .unwrap_or(0);
    let col = (grid_width.min(i8::MAX as u8) as i8 - box_size(kind)) / 2;
    Pos::new(-top, col)
}

/// Check that every table entry has exactly four distinct cells.
pub fn validate_shape_tables() -> Result<(), ShapeTableError> {
    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            let mut cells: ArrayVec<CellOffset, 4> = shape(kind, rotation).iter().copied().collect();
            cells.sort_unstable();
            let distinct = 1 + cells.windows(2).filter(|w| w[0] != w[1]).count();
            if distinct != 4 {
                return Err(ShapeTableError {
                    kind,
                    rotation,
                    distinct,
                });
            }
        }
    }
    Ok(())
}

/// Five kick offsets `(drow, dcol)`, tried in order; the first is always `(0, 0)`.
pub type KickRow = [CellOffset; 5];

/// Kick rows indexed by [`kick_index`].
pub type KickTable = [KickRow; 8];

const NO_KICKS: KickTable = [[(0, 0); 5]; 8];

const JLSTZ_KICKS: KickTable = [
    // N->E
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
    // N->W
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    // E->N
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // E->S
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // S->E
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
    // S->W
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    // W->S
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    // W->N
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
];

const I_KICKS: KickTable = [
    // N->E
    [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
    // N->W
    [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    // E->N
    [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
    // E->S
    [(0, 0), (0, -1), (0, 2), (-2, -1), (1, 2)],
    // S->E
    [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
    // S->W
    [(0, 0), (0, 2), (0, -1), (-1, 2), (2, -1)],
    // W->S
    [(0, 0), (0, -2), (0, 1), (1, -2), (-2, 1)],
    // W->N
    [(0, 0), (0, 1), (0, -2), (2, 1), (-1, -2)],
];

pub fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &NO_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// Row of the kick table for a rotation leaving `from` in `direction`.
pub fn kick_index(from: Rotation, direction: RotateDirection) -> usize {
    use RotateDirection::{Clockwise as Cw, CounterClockwise as Ccw};
    match (from, direction) {
        (Rotation::North, Cw) => 0,
        (Rotation::North, Ccw) => 1,
        (Rotation::East, Ccw) => 2,
        (Rotation::East, Cw) => 3,
        (Rotation::South, Ccw) => 4,
        (Rotation::South, Cw) => 5,
        (Rotation::West, Ccw) => 6,
        (Rotation::West, Cw) => 7,
    }
}

/// Kick offsets to try for a rotation, starting with the in-place attempt.
pub fn kicks(kind: PieceKind, from: Rotation, direction: RotateDirection) -> &'static KickRow {
    &kick_table(kind)[kick_index(from, direction)]
}
