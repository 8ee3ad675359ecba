//! Terminal input module.
//!
//! Maps `crossterm` key events onto engine [`crate::types::Command`]s. There
//! is no key repeat handling here: every press is one command, and terminals
//! that report auto-repeat simply deliver more presses.

pub mod map;

pub use tetro_types as types;

pub use map::{handle_key_event, should_quit};
