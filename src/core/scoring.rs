//! Scoring module - line-clear points, level progression, fall cadence
//!
//! Points are `lines * 100 * level`, with the level sampled before it is
//! recomputed from the new line total. The level advances every 10 cleared
//! lines and starts at 1.

use crate::types::{BASE_FALL_MS, FALL_STEP_MS, LINES_PER_LEVEL, LINE_SCORE, MIN_FALL_MS};

/// Points awarded for clearing `lines` rows at the given level.
pub fn score_for_clear(lines: u32, level: u32) -> u32 {
    lines * LINE_SCORE * level
}

/// Level implied by a total line count. Starts at 1, +1 per 10 lines.
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds)
///
/// Each level shaves 100ms off the base 1000ms, floored at 50ms.
pub fn fall_interval_ms(level: u32) -> u32 {
    BASE_FALL_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(FALL_STEP_MS))
        .max(MIN_FALL_MS)
}
