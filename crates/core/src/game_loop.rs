//! Game loop - owns the grid, the active piece and the score, and applies
//! commands to them one at a time.
//!
//! Every change goes through [`GameLoop::handle`]. Ticks and player input
//! arrive through the same [`CommandQueue`], so there is no interleaving to
//! reason about: a command sees the state left by the one before it.

use tracing::{debug, info, warn};

use crate::collision::{drop_distance, is_legal, landed};
use crate::config::{EngineConfig, RotationSystem};
use crate::error::{ConfigError, EngineError};
use crate::events::GameEvent;
use crate::factory::PieceFactory;
use crate::grid::Grid;
use crate::line_clear::clear_full_rows;
use crate::piece::Piece;
use crate::pieces::{kicks, validate_shape_tables};
use crate::queue::CommandQueue;
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_points};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, Mode, PieceKind, RotateDirection};

#[derive(Debug, Clone)]
pub struct GameLoop {
    grid: Grid,
    active: Option<Piece>,
    factory: PieceFactory,
    rotation_system: RotationSystem,
    start_level: u32,
    mode: Mode,
    piece_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    events: Vec<GameEvent>,
}

impl GameLoop {
    /// New game on an empty grid, with a piece already falling.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = Grid::with_size(config.width, config.height)?;
        let factory = PieceFactory::new(config.randomizer, config.seed);
        Self::with_parts(&config, grid, factory)
    }

    /// New game on a pre-filled grid. The grid's dimensions take precedence
    /// over the ones in `config`.
    pub fn with_grid(config: EngineConfig, grid: Grid) -> Result<Self, EngineError> {
        let factory = PieceFactory::new(config.randomizer, config.seed);
        Self::with_parts(&config, grid, factory)
    }

    /// New game from an explicit grid and piece source.
    ///
    /// If the first piece cannot spawn the game starts in `GameOver`.
    pub fn with_parts(
        config: &EngineConfig,
        grid: Grid,
        factory: PieceFactory,
    ) -> Result<Self, EngineError> {
        validate_shape_tables()?;
        if config.start_level == 0 {
            return Err(ConfigError::ZeroStartLevel.into());
        }

        let mut game = Self {
            grid,
            active: None,
            factory,
            rotation_system: config.rotation_system,
            start_level: config.start_level,
            mode: Mode::Running,
            piece_id: 0,
            score: 0,
            level: config.start_level,
            lines: 0,
            events: Vec::new(),
        };
        info!(
            width = game.grid.width(),
            height = game.grid.height(),
            randomizer = game.factory.randomizer().as_str(),
            rotation = game.rotation_system.as_str(),
            start_level = game.start_level,
            "game created"
        );
        game.spawn_next();
        Ok(game)
    }

    // ---- queries ----

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.factory.peek()
    }

    /// Where the active piece would land.
    pub fn ghost(&self) -> Option<Piece> {
        self.active.map(|piece| landed(&piece, &self.grid))
    }

    /// Anchor row of [`GameLoop::ghost`].
    pub fn ghost_row(&self) -> Option<i8> {
        self.ghost().map(|piece| piece.anchor.row)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn rotation_system(&self) -> RotationSystem {
        self.rotation_system
    }

    /// Number of pieces spawned in this game so far.
    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Gravity interval for the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Events produced since the last drain, oldest first.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.board.clear();
        out.board.extend(
            self.grid
                .cells()
                .iter()
                .map(|cell| cell.map_or(0, |kind| kind.color_id())),
        );
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.next = self.factory.peek();
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.mode = self.mode;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    // ---- commands ----

    /// Apply one command. Returns whether the game state changed.
    pub fn handle(&mut self, command: Command) -> bool {
        match (self.mode, command) {
            (_, Command::Restart) => {
                self.restart();
                true
            }
            (Mode::GameOver, _) => false,
            (_, Command::Pause) => self.pause(),
            (_, Command::Resume) => self.resume(),
            (Mode::Paused, Command::TogglePause) => self.resume(),
            (_, Command::TogglePause) => self.pause(),
            (Mode::Paused, _) => false,
            (Mode::Running, command) => self.play(command),
        }
    }

    /// Consume every queued command in arrival order. Returns how many were
    /// taken off the queue (including ignored ones).
    pub fn run_queue(&mut self, queue: &mut CommandQueue) -> usize {
        let mut consumed = 0;
        while let Some(command) = queue.pop() {
            self.handle(command);
            consumed += 1;
        }
        consumed
    }

    /// One gravity step: fall a row, or lock if the piece is resting.
    pub fn tick(&mut self) -> bool {
        if self.mode != Mode::Running || self.active.is_none() {
            return false;
        }
        self.try_translate(1, 0) || self.lock_active()
    }

    pub fn pause(&mut self) -> bool {
        if self.mode != Mode::Running {
            return false;
        }
        self.mode = Mode::Paused;
        self.events.push(GameEvent::Paused);
        debug!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.mode != Mode::Paused {
            return false;
        }
        self.mode = Mode::Running;
        self.events.push(GameEvent::Resumed);
        debug!("resumed");
        true
    }

    /// Throw the current game away and start over with the same settings.
    pub fn restart(&mut self) {
        self.grid.reset();
        self.factory.reset();
        self.active = None;
        self.mode = Mode::Running;
        self.piece_id = 0;
        self.score = 0;
        self.level = self.start_level;
        self.lines = 0;
        self.events.push(GameEvent::Restarted);
        info!("game restarted");
        self.spawn_next();
    }

    fn play(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_translate(0, -1),
            Command::MoveRight => self.try_translate(0, 1),
            Command::SoftDrop => self.try_translate(1, 0),
            Command::Rotate => self.try_rotate(RotateDirection::Clockwise),
            Command::RotateCcw => self.try_rotate(RotateDirection::CounterClockwise),
            Command::HardDrop => self.hard_drop(),
            Command::Tick => self.tick(),
            Command::Pause | Command::Resume | Command::TogglePause | Command::Restart => false,
        }
    }

    fn try_translate(&mut self, drow: i8, dcol: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.translated(drow, dcol);
        if !is_legal(&candidate, &self.grid) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.rotated(direction);

        let found = match self.rotation_system {
            RotationSystem::Fixed => Some(rotated).filter(|p| is_legal(p, &self.grid)),
            RotationSystem::Srs => kicks(active.kind, active.rotation, direction)
                .iter()
                .map(|&(drow, dcol)| rotated.translated(drow, dcol))
                .find(|p| is_legal(p, &self.grid)),
        };

        match found {
            Some(piece) => {
                self.active = Some(piece);
                true
            }
            None => false,
        }
    }

    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let distance = drop_distance(&active, &self.grid);
        self.active = Some(active.translated(distance as i8, 0));
        if !self.lock_active() {
            self.active = Some(active);
            return false;
        }
        true
    }

    /// Write the active piece into the grid and move on to the next one.
    ///
    /// A rejected write leaves the piece active and the grid untouched.
    fn lock_active(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let cells = active.cells();
        if let Err(err) = self.grid.lock_cells(&cells, active.kind) {
            warn!(kind = active.kind.as_str(), error = %err, "lock rejected");
            return false;
        }
        self.active = None;
        debug!(
            kind = active.kind.as_str(),
            rotation = active.rotation.as_str(),
            row = active.anchor.row,
            col = active.anchor.col,
            "locked"
        );
        self.events.push(GameEvent::PieceLocked {
            kind: active.kind,
            cells,
        });

        let cleared = match clear_full_rows(&mut self.grid) {
            Ok(rows) => rows.len(),
            Err(err) => {
                warn!(error = %err, "line clear failed");
                0
            }
        };

        if cleared > 0 {
            let points = line_clear_points(cleared, self.level);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared as u32);
            debug!(count = cleared, points, total = self.lines, "lines cleared");
            self.events.push(GameEvent::LinesCleared {
                count: cleared as u32,
                points,
            });

            let level = level_for_lines(self.start_level, self.lines);
            if level != self.level {
                self.level = level;
                info!(level, interval_ms = self.drop_interval_ms(), "level changed");
                self.events.push(GameEvent::LevelChanged { level });
            }
        }

        self.spawn_next();
        true
    }

    fn spawn_next(&mut self) -> bool {
        let piece = self.factory.next(self.grid.width());
        if !is_legal(&piece, &self.grid) {
            self.active = None;
            self.mode = Mode::GameOver;
            info!(score = self.score, lines = self.lines, level = self.level, "game over");
            self.events.push(GameEvent::GameOver { score: self.score });
            return false;
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        debug!(kind = piece.kind.as_str(), piece_id = self.piece_id, "spawned");
        self.active = Some(piece);
        true
    }
}
