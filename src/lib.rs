//! Tetro (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benchmarks can write `tetro::core::GameLoop`
//! instead of depending on every member crate.

pub use tetro_core as core;
pub use tetro_input as input;
pub use tetro_term as term;
pub use tetro_types as types;
