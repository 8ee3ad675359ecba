//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a game of falling tetrominoes without a screen:
//! the grid, the piece geometry, collision, line clears, scoring and the
//! command-driven game loop. Nothing here reads a clock or touches a terminal;
//! the same seed and the same commands always produce the same game.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size board of cells (default 10x20, row 0 at the top)
//! - [`pieces`]: static shape tables and optional SRS kick tables
//! - [`piece`]: the falling piece as a value; moves produce candidates
//! - [`collision`]: the single legality predicate and drop helpers
//! - [`line_clear`]: full-row detection and compaction
//! - [`scoring`]: points, levels and gravity speed
//! - [`factory`]: piece kind sequences (uniform, 7-bag, fixed cycle)
//! - [`game_loop`]: command dispatch, locking, spawning, game over
//! - [`queue`] / [`timer`]: helpers for feeding commands and gravity ticks
//!
//! # Example
//!
//! ```
//! use tetro_core::{EngineConfig, GameLoop};
//! use tetro_core::types::{Command, Mode};
//!
//! let mut game = GameLoop::new(EngineConfig::default()).unwrap();
//! game.handle(Command::MoveRight);
//! game.handle(Command::Rotate);
//! game.handle(Command::HardDrop);
//!
//! assert_eq!(game.grid().occupied_count(), 4);
//! assert_eq!(game.mode(), Mode::Running);
//! ```
//!
//! # Timing
//!
//! Gravity is just another command. A host measures time, asks
//! [`GravityClock`] how many ticks are due at
//! [`GameLoop::drop_interval_ms`], and queues that many `Command::Tick`s
//! alongside the player's input.

pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod factory;
pub mod game_loop;
pub mod grid;
pub mod line_clear;
pub mod piece;
pub mod pieces;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use tetro_types as types;

// Re-export commonly used types for convenience
pub use collision::{can_descend, drop_distance, is_legal};
pub use config::{EngineConfig, RotationSystem};
pub use error::{ConfigError, EngineError, GridError, ShapeTableError};
pub use events::GameEvent;
pub use factory::{PieceFactory, Randomizer};
pub use game_loop::GameLoop;
pub use grid::Grid;
pub use line_clear::{clear_and_compact, find_full_rows};
pub use piece::Piece;
pub use pieces::{shape, spawn_anchor, validate_shape_tables};
pub use queue::CommandQueue;
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timer::GravityClock;
