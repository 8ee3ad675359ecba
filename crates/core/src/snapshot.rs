use serde::Serialize;

use crate::piece::Piece;
use crate::types::{Mode, PieceKind, Pos, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
    pub cells: [Pos; 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.anchor.row,
            col: value.anchor.col,
            cells: value.cells(),
        }
    }
}

/// Read-only view of a game for renderers and observers.
///
/// `board` is row-major, `width * height` entries; 0 is empty and any other
/// value is [`PieceKind::color_id`] of the piece that filled the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: PieceKind,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub mode: Mode,
}

impl GameSnapshot {
    /// Color id at `(row, col)`, 0 when empty or off the board.
    pub fn cell(&self, row: i8, col: i8) -> u8 {
        if row < 0 || col < 0 || row as u8 >= self.height || col as u8 >= self.width {
            return 0;
        }
        self.board
            .get(row as usize * self.width as usize + col as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Cells of the ghost piece: the active piece moved down to `ghost_row`.
    pub fn ghost_cells(&self) -> Option<[Pos; 4]> {
        let active = self.active?;
        let ghost_row = self.ghost_row?;
        let drop = ghost_row.saturating_sub(active.row);
        Some(active.cells.map(|p| p.offset(drop, 0)))
    }

    pub fn playable(&self) -> bool {
        self.mode == Mode::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![0; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            next: PieceKind::I,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            mode: Mode::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_lookup_ignores_out_of_range() {
        let mut snap = GameSnapshot::default();
        snap.board[19 * 10 + 9] = PieceKind::L.color_id();
        assert_eq!(snap.cell(19, 9), PieceKind::L.color_id());
        assert_eq!(snap.cell(-1, 0), 0);
        assert_eq!(snap.cell(0, 10), 0);
        assert_eq!(snap.cell(20, 0), 0);
    }

    #[test]
    fn ghost_cells_follow_the_active_piece() {
        let piece = Piece::spawn(PieceKind::O, 10);
        let snap = GameSnapshot {
            active: Some(piece.into()),
            ghost_row: Some(piece.anchor.row + 18),
            ..GameSnapshot::default()
        };
        let ghost = snap.ghost_cells().expect("active piece has a ghost");
        assert!(ghost.iter().all(|p| p.row >= 18));
    }

    #[test]
    fn only_running_games_are_playable() {
        let mut snap = GameSnapshot::default();
        assert!(snap.playable());
        for mode in [Mode::Paused, Mode::GameOver] {
            snap.mode = mode;
            assert!(!snap.playable(), "{}", mode.as_str());
        }
    }
}
