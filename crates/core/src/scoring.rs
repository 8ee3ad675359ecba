//! Scoring module - line clear points, levels and gravity speed
//!
//! One fixed policy:
//! - 1/2/3/4 rows score 100/300/500/800 points times the level the clear
//!   happened on. More than four rows at once scores nothing (a single lock
//!   cannot produce it).
//! - The level goes up by one every 10 cleared lines, starting from the
//!   configured start level.
//! - Gravity falls from 500ms per row at level 1 by 50ms per level down to a
//!   100ms floor.
//! - Soft and hard drops are not rewarded.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows at `level`.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Level after `total_lines` cleared lines.
pub fn level_for_lines(start_level: u32, total_lines: u32) -> u32 {
    start_level.saturating_add(total_lines / LINES_PER_LEVEL)
}

/// Gravity interval for a level, in milliseconds.
///
/// Non-increasing in `level`; level 0 behaves like level 1.
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_points_table() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);
        assert_eq!(line_clear_points(5, 1), 0);
    }

    #[test]
    fn test_line_points_scale_with_level() {
        assert_eq!(line_clear_points(1, 3), 300);
        assert_eq!(line_clear_points(4, 5), 4000);
        assert_eq!(line_clear_points(4, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(level_for_lines(1, 0), 1);
        assert_eq!(level_for_lines(1, 9), 1);
        assert_eq!(level_for_lines(1, 10), 2);
        assert_eq!(level_for_lines(1, 35), 4);
        assert_eq!(level_for_lines(5, 10), 6);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(0), 500);
        assert_eq!(drop_interval_ms(1), 500);
        assert_eq!(drop_interval_ms(2), 450);
        assert_eq!(drop_interval_ms(5), 300);
        assert_eq!(drop_interval_ms(9), 100);
        assert_eq!(drop_interval_ms(50), 100);
        assert_eq!(drop_interval_ms(u32::MAX), 100);
    }

    #[test]
    fn test_drop_interval_never_speeds_down() {
        let mut previous = drop_interval_ms(0);
        for level in 1..100 {
            let interval = drop_interval_ms(level);
            assert!(interval <= previous, "level {level}");
            previous = interval;
        }
    }
}
