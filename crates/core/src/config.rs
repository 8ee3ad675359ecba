//! Engine configuration.
//!
//! Defaults describe the standard game; [`EngineConfig::from_env`] lets the
//! host override them through `TETRO_*` environment variables. Values that
//! fail to parse fall back to the default rather than aborting.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::factory::Randomizer;
use crate::grid::Grid;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

/// How rotations that collide are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationSystem {
    /// Rotate in place or not at all.
    #[default]
    Fixed,
    /// Try the SRS wall kick offsets in order; first legal one wins.
    Srs,
}

impl RotationSystem {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "none" => Some(RotationSystem::Fixed),
            "srs" => Some(RotationSystem::Srs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationSystem::Fixed => "fixed",
            RotationSystem::Srs => "srs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub seed: u32,
    pub randomizer: Randomizer,
    pub rotation_system: RotationSystem,
    pub start_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            randomizer: Randomizer::Uniform,
            rotation_system: RotationSystem::Fixed,
            start_level: START_LEVEL,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `TETRO_WIDTH`, `TETRO_HEIGHT`: board size
    /// - `TETRO_SEED`: RNG seed
    /// - `TETRO_RANDOMIZER`: `uniform`, `bag` or `cycle`
    /// - `TETRO_ROTATION`: `fixed` or `srs`
    /// - `TETRO_START_LEVEL`: level of a new game
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            width: parse_var(&lookup, "TETRO_WIDTH").unwrap_or(defaults.width),
            height: parse_var(&lookup, "TETRO_HEIGHT").unwrap_or(defaults.height),
            seed: parse_var(&lookup, "TETRO_SEED").unwrap_or(defaults.seed),
            randomizer: lookup("TETRO_RANDOMIZER")
                .and_then(|s| Randomizer::from_str(&s))
                .unwrap_or(defaults.randomizer),
            rotation_system: lookup("TETRO_ROTATION")
                .and_then(|s| RotationSystem::from_str(&s))
                .unwrap_or(defaults.rotation_system),
            start_level: parse_var(&lookup, "TETRO_START_LEVEL")
                .unwrap_or(defaults.start_level),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_rotation_system(mut self, rotation_system: RotationSystem) -> Self {
        self.rotation_system = rotation_system;
        self
    }

    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::with_size(self.width, self.height)?;
        if self.start_level == 0 {
            return Err(ConfigError::ZeroStartLevel);
        }
        Ok(())
    }
}

/// Parse one variable, `None` when it is unset or malformed.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(EngineConfig::from_lookup(|_| None), EngineConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TETRO_WIDTH", "8"),
            ("TETRO_HEIGHT", " 16 "),
            ("TETRO_SEED", "99"),
            ("TETRO_RANDOMIZER", "bag"),
            ("TETRO_ROTATION", "SRS"),
            ("TETRO_START_LEVEL", "3"),
        ]));

        assert_eq!(config.width, 8);
        assert_eq!(config.height, 16);
        assert_eq!(config.seed, 99);
        assert_eq!(config.randomizer, Randomizer::SevenBag);
        assert_eq!(config.rotation_system, RotationSystem::Srs);
        assert_eq!(config.start_level, 3);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TETRO_WIDTH", "wide"),
            ("TETRO_RANDOMIZER", "tgm"),
            ("TETRO_START_LEVEL", "-2"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn numeric_variables_keep_their_own_range() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("TETRO_WIDTH", "300"),
            ("TETRO_SEED", "99999"),
            ("TETRO_START_LEVEL", "4000000000"),
        ]));
        // 300 does not fit a board dimension; the seed and level are not truncated.
        assert_eq!(config.width, EngineConfig::default().width);
        assert_eq!(config.seed, 99_999);
        assert_eq!(config.start_level, 4_000_000_000);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(
            EngineConfig::default().with_size(0, 20).validate(),
            Err(ConfigError::Grid(crate::error::GridError::InvalidDimensions {
                width: 0,
                height: 20
            }))
        );

        let config = EngineConfig {
            start_level: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStartLevel));
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }
}
