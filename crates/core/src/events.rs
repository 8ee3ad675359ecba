//! Notifications for the UI collaborator.
//!
//! The game loop buffers events as they happen; the integration layer drains
//! them (`GameLoop::drain_events`) and reacts however it likes.

use serde::Serialize;

use crate::types::{PieceKind, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A piece was written into the grid.
    PieceLocked { kind: PieceKind, cells: [Pos; 4] },
    /// Rows were removed by the last lock.
    LinesCleared { count: u32, points: u32 },
    LevelChanged { level: u32 },
    /// The next piece could not spawn.
    GameOver { score: u32 },
    Paused,
    Resumed,
    Restarted,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PieceLocked { .. } => "pieceLocked",
            GameEvent::LinesCleared { .. } => "linesCleared",
            GameEvent::LevelChanged { .. } => "levelChanged",
            GameEvent::GameOver { .. } => "gameOver",
            GameEvent::Paused => "paused",
            GameEvent::Resumed => "resumed",
            GameEvent::Restarted => "restarted",
        }
    }
}
