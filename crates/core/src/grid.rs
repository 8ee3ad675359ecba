//! Grid module - the board's cell storage
//!
//! A `width x height` grid (10x20 by default) where each cell is empty or
//! occupied by a piece kind. Storage is a flat row-major slice allocated once
//! per grid; all later mutation happens in place.
//!
//! Coordinates: `(row, col)` with row 0 at the top and column 0 on the left.
//! Any access outside the board fails with [`GridError::OutOfBounds`] instead
//! of clamping, so integration bugs surface at the call site.

use crate::error::GridError;
use crate::types::{Cell, PieceKind, Pos, BOARD_HEIGHT, BOARD_WIDTH, MAX_DIMENSION};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Row-major cells (row * width + col)
    cells: Box<[Cell]>,
}

impl Grid {
    /// Create a standard 10x20 empty grid
    pub fn new() -> Self {
        Self::empty(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty grid of any supported size.
    pub fn with_size(width: u8, height: u8) -> Result<Self, GridError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self::empty(width, height))
    }

    fn empty(width: u8, height: u8) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; len].into_boxed_slice(),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `(row, col)` lies on the board.
    pub fn contains(&self, row: i8, col: i8) -> bool {
        row >= 0 && col >= 0 && (row as u8) < self.height && (col as u8) < self.width
    }

    #[inline(always)]
    fn index(&self, row: i8, col: i8) -> Result<usize, GridError> {
        if !self.contains(row, col) {
            return Err(GridError::OutOfBounds {
                row: row.into(),
                col: col.into(),
            });
        }
        Ok(row as usize * self.width as usize + col as usize)
    }

    fn row_range(&self, row: u8) -> Result<std::ops::Range<usize>, GridError> {
        if row >= self.height {
            return Err(GridError::OutOfBounds {
                row: row.into(),
                col: 0,
            });
        }
        let start = row as usize * self.width as usize;
        Ok(start..start + self.width as usize)
    }

    pub fn get(&self, row: i8, col: i8) -> Result<Cell, GridError> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Whether the cell is unoccupied.
    pub fn is_empty(&self, row: i8, col: i8) -> Result<bool, GridError> {
        self.get(row, col).map(|cell| cell.is_none())
    }

    /// Mark a cell occupied with the given kind's color.
    pub fn occupy(&mut self, row: i8, col: i8, kind: PieceKind) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = Some(kind);
        Ok(())
    }

    /// Empty a single cell.
    pub fn vacate(&mut self, row: i8, col: i8) -> Result<(), GridError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = None;
        Ok(())
    }

    /// Write a piece's cells into the grid.
    ///
    /// Every cell is checked before anything is written, so on error the grid
    /// is left untouched.
    pub fn lock_cells(&mut self, cells: &[Pos], kind: PieceKind) -> Result<(), GridError> {
        for pos in cells {
            if !self.is_empty(pos.row, pos.col)? {
                return Err(GridError::Occupied {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }
        for pos in cells {
            self.occupy(pos.row, pos.col, kind)?;
        }
        Ok(())
    }

    pub fn row(&self, row: u8) -> Result<&[Cell], GridError> {
        let range = self.row_range(row)?;
        Ok(&self.cells[range])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    pub fn is_row_full(&self, row: u8) -> Result<bool, GridError> {
        Ok(self.row(row)?.iter().all(Option::is_some))
    }

    /// Empty an entire row in place.
    pub fn clear_row(&mut self, row: u8) -> Result<(), GridError> {
        let range = self.row_range(row)?;
        self.cells[range].fill(None);
        Ok(())
    }

    /// Move every row above `from_row` down by one and empty the top row.
    ///
    /// Row `from_row` itself is overwritten by the row above it.
    pub fn shift_rows_down(&mut self, from_row: u8) -> Result<(), GridError> {
        self.row_range(from_row)?;
        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=from_row as usize).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }
        self.cells[..width].fill(None);
        Ok(())
    }

    /// Number of occupied cells on the whole board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Flat row-major view of all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from text rows, `.` for empty and a piece letter for
    /// occupied. Handy for tests and benchmarks.
    ///
    /// ```
    /// use tetro_core::Grid;
    ///
    /// let grid = Grid::from_rows(&["..", "IO"]).unwrap();
    /// assert_eq!(grid.occupied_count(), 2);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let height = u8::try_from(rows.len()).unwrap_or(u8::MAX);
        let width = rows
            .first()
            .map(|r| u8::try_from(r.chars().count()).unwrap_or(u8::MAX))
            .unwrap_or(0);
        let mut grid = Self::with_size(width, height)?;

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width as usize {
                return Err(GridError::InvalidDimensions { width, height });
            }
            for (col, ch) in line.chars().enumerate() {
                match (ch, PieceKind::from_char(ch)) {
                    ('.', _) => {}
                    (_, Some(kind)) => grid.occupy(row as i8, col as i8, kind)?,
                    (ch, None) => {
                        return Err(GridError::UnknownCell {
                            row: row as u8,
                            col: col as u8,
                            ch,
                        })
                    }
                }
            }
        }
        Ok(grid)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let grid = Grid::new();
        assert_eq!(grid.index(0, 0), Ok(0));
        assert_eq!(grid.index(0, 9), Ok(9));
        assert_eq!(grid.index(1, 0), Ok(10));
        assert_eq!(grid.index(19, 9), Ok(199));
        assert!(grid.index(-1, 0).is_err());
        assert!(grid.index(0, 10).is_err());
        assert!(grid.index(20, 0).is_err());
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert!(Grid::with_size(0, 5).is_err());
        assert!(Grid::with_size(5, 0).is_err());
        assert!(Grid::with_size(128, 5).is_err());
        assert!(Grid::with_size(127, 127).is_ok());
    }

    #[test]
    fn shift_rows_down_from_top_row_only_clears_it() {
        let mut grid = Grid::from_rows(&["II", "..", "OO"]).unwrap();
        grid.shift_rows_down(0).unwrap();
        assert_eq!(grid.occupied_count(), 2);
        assert_eq!(grid.get(2, 0), Ok(Some(PieceKind::O)));
        assert_eq!(grid.row(0).unwrap(), &[None, None]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&["..", "..."]).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn from_rows_rejects_unknown_cells() {
        assert_eq!(
            Grid::from_rows(&["..", "I#"]),
            Err(GridError::UnknownCell { row: 1, col: 1, ch: '#' })
        );
        assert_eq!(
            Grid::from_rows(&["X."]),
            Err(GridError::UnknownCell { row: 0, col: 0, ch: 'X' })
        );
        assert_eq!(Grid::from_rows(&["zL"]).map(|g| g.occupied_count()), Ok(2));
    }
}
