//! Collision checks.
//!
//! A single predicate, [`is_legal`], decides translations, rotations and the
//! "can still fall" test. Positions off the board block like occupied cells;
//! they are never reported as errors here.

use crate::grid::Grid;
use crate::piece::Piece;

/// True iff every cell of `piece` is on the board and empty.
pub fn is_legal(piece: &Piece, grid: &Grid) -> bool {
    piece
        .cells()
        .iter()
        .all(|pos| matches!(grid.is_empty(pos.row, pos.col), Ok(true)))
}

/// Whether the piece could move one row down.
pub fn can_descend(piece: &Piece, grid: &Grid) -> bool {
    is_legal(&piece.translated(1, 0), grid)
}

/// How many rows the piece can fall before it would collide.
pub fn drop_distance(piece: &Piece, grid: &Grid) -> u8 {
    let mut distance: u8 = 0;
    let mut probe = *piece;
    while distance < grid.height() && can_descend(&probe, grid) {
        probe = probe.translated(1, 0);
        distance += 1;
    }
    distance
}

/// The piece moved as far down as it can go.
pub fn landed(piece: &Piece, grid: &Grid) -> Piece {
    piece.translated(drop_distance(piece, grid) as i8, 0)
}
