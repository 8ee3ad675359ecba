//! Engine error types.
//!
//! Illegal moves and spawn collisions are *not* errors: the former are
//! rejected no-ops and the latter is the `GameOver` mode. These types cover
//! caller mistakes (out-of-range grid access) and bad construction input.

use thiserror::Error;

use crate::types::{PieceKind, Rotation};

/// Grid access and construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: i16, col: i16 },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: i8, col: i8 },

    #[error("invalid board dimensions {width}x{height} (each must be 1..=127)")]
    InvalidDimensions { width: u8, height: u8 },

    #[error("unknown cell {ch:?} at ({row}, {col}), expected '.' or a piece letter")]
    UnknownCell { row: u8, col: u8, ch: char },
}

/// A malformed entry in the static shape tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shape table entry {kind:?}/{rotation:?} has {distinct} distinct cells, expected 4")]
pub struct ShapeTableError {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub distinct: usize,
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("start level must be at least 1")]
    ZeroStartLevel,

    #[error("piece order for the cycle randomizer is empty")]
    EmptyPieceOrder,

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Everything that can stop a game loop from being constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    ShapeTable(#[from] ShapeTableError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_the_cell() {
        let err = GridError::OutOfBounds { row: -1, col: 4 };
        assert_eq!(err.to_string(), "cell (-1, 4) is outside the board");
    }

    #[test]
    fn engine_error_wraps_config_error() {
        let err: EngineError = ConfigError::ZeroStartLevel.into();
        assert_eq!(err.to_string(), "start level must be at least 1");
    }
}
