//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a [`GameView`] paints a
//! [`core::GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`],
//! and a [`TerminalRenderer`] flushes that buffer through crossterm. No
//! widget toolkit is involved, which keeps the aspect ratio (2 columns per
//! board cell) under our control.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetro_core as core;
pub use tetro_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
