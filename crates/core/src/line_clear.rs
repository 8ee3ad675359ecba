//! Line clear detection and compaction.

use crate::error::GridError;
use crate::grid::Grid;

/// Indices of full rows, top to bottom.
///
/// Lazy and recomputed on every call; nothing is cached because the grid
/// changes between calls.
pub fn find_full_rows(grid: &Grid) -> impl Iterator<Item = u8> + '_ {
    grid.rows()
        .enumerate()
        .filter(|(_, row)| row.iter().all(Option::is_some))
        .map(|(idx, _)| idx as u8)
}

/// Remove `rows` and let everything above fall into the gaps.
///
/// Rows are processed top to bottom: shifting only touches rows at or above
/// the removed one, so the indices of the rows still to remove stay valid.
/// Duplicates are ignored. Every index is checked before the grid is touched.
/// Returns the number of rows removed.
pub fn clear_and_compact(
    grid: &mut Grid,
    rows: impl IntoIterator<Item = u8>,
) -> Result<usize, GridError> {
    let mut rows: Vec<u8> = rows.into_iter().collect();
    rows.sort_unstable();
    rows.dedup();

    if let Some(&last) = rows.last() {
        if last >= grid.height() {
            return Err(GridError::OutOfBounds {
                row: last.into(),
                col: 0,
            });
        }
    }

    for &row in &rows {
        grid.clear_row(row)?;
        grid.shift_rows_down(row)?;
    }
    Ok(rows.len())
}

/// Find and remove every full row. Returns the removed indices, top to bottom.
pub fn clear_full_rows(grid: &mut Grid) -> Result<Vec<u8>, GridError> {
    let rows: Vec<u8> = find_full_rows(grid).collect();
    clear_and_compact(grid, rows.iter().copied())?;
    Ok(rows)
}
