//! Scoring module - line-clear score, combo, garbage attack and gravity tables
//!
//! Score for a lock that clears `rows` rows:
//!
//! ```text
//! (ceil((level + rows) / 4) + soft_drop_frames) * rows * combo * bonus
//! ```
//!
//! `level` is the level after this lock's increments. `bonus` is 4 unless the
//! bottom row still holds at least one cell after compaction, in which case
//! it is 1.

use crate::types::GRAVITY_DENOMINATOR;

/// Bonus factor when the bottom row is empty after a clear
pub const EMPTY_FLOOR_BONUS: u64 = 4;

/// Score for one lock
pub fn calculate_line_clear_score(
    level: u32,
    rows: u32,
    soft_drop_frames: u32,
    combo: u32,
    bottom_row_occupied: bool,
) -> u64 {
    let bonus = if bottom_row_occupied {
        1
    } else {
        EMPTY_FLOOR_BONUS
    };
    let base = u64::from(level + rows).div_ceil(4) + u64::from(soft_drop_frames);
    base * u64::from(rows) * u64::from(combo) * bonus
}

/// Combo after a lock: grows by `2 * rows - 2` on a clear (so a single leaves
/// it unchanged) and falls back to 1 on a lock that clears nothing.
pub fn next_combo(combo: u32, rows: u32) -> u32 {
    if rows == 0 {
        1
    } else {
        combo + 2 * rows - 2
    }
}

/// Garbage lines a clear is worth before cancellation: a four-row clear sends
/// all four, smaller multi-row clears one fewer than they cleared.
pub fn attack_lines(rows: u32) -> u32 {
    match rows {
        0 | 1 => 0,
        4 => 4,
        n => n - 1,
    }
}

/// Which speed table a board reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityMode {
    /// Values are 1/256 rows per frame
    Single,
    /// Values are frames per row
    Versus,
}

/// Single-player speed table, (level, 1/256 rows per frame)
const SINGLE_PLAYER_GRAVITY: &[(u32, u32)] = &[
    (0, 4),
    (30, 6),
    (35, 8),
    (40, 10),
    (50, 12),
    (60, 16),
    (70, 32),
    (80, 48),
    (90, 64),
    (100, 80),
    (120, 96),
    (140, 112),
    (160, 128),
    (170, 144),
    (200, 4),
    (220, 32),
    (230, 64),
    (233, 96),
    (236, 128),
    (239, 160),
    (243, 192),
    (247, 224),
    (251, 256),
    (300, 512),
    (330, 768),
    (360, 1024),
    (400, 1280),
    (420, 1024),
    (450, 768),
    (500, 5120),
];

/// Versus speed table, (level, frames per row)
const VERSUS_GRAVITY: &[(u32, u32)] = &[
    (0, 48),
    (10, 43),
    (20, 38),
    (30, 33),
    (40, 28),
    (50, 23),
    (60, 18),
    (70, 13),
    (80, 8),
    (90, 6),
    (100, 5),
    (130, 4),
    (160, 3),
    (190, 2),
    (290, 1),
];

impl GravityMode {
    fn table(&self) -> &'static [(u32, u32)] {
        match self {
            GravityMode::Single => SINGLE_PLAYER_GRAVITY,
            GravityMode::Versus => VERSUS_GRAVITY,
        }
    }

    /// Table entry for exactly this level. The tables are sparse: `None`
    /// means "keep the current gravity".
    pub fn lookup(&self, level: u32) -> Option<u32> {
        let table = self.table();
        table
            .binary_search_by_key(&level, |&(l, _)| l)
            .ok()
            .map(|i| table[i].1)
    }

    /// Gravity at level 0
    pub fn initial(&self) -> u32 {
        self.table()[0].1
    }

    /// Gravity in effect at `level`: the last table entry at or below it
    pub fn at_level(&self, level: u32) -> u32 {
        self.table()
            .iter()
            .take_while(|&&(l, _)| l <= level)
            .last()
            .map_or(self.initial(), |&(_, g)| g)
    }

    /// New gravity after reaching `level`, carrying `current` forward when
    /// the table has no entry
    pub fn after_level_up(&self, level: u32, current: u32) -> u32 {
        self.lookup(level).unwrap_or(current)
    }

    /// Gravity as a rational rate, `(rows, frames)`: `rows` gravity steps
    /// spread over every `frames` frames
    pub fn rate(&self, gravity: u32, sped_up: bool) -> (u32, u32) {
        match self {
            GravityMode::Single => {
                if sped_up && gravity < GRAVITY_DENOMINATOR {
                    (1, 1)
                } else {
                    (gravity, GRAVITY_DENOMINATOR)
                }
            }
            GravityMode::Versus => {
                if sped_up {
                    (1, 1)
                } else {
                    (1, gravity.max(1))
                }
            }
        }
    }

    /// Rows per frame for a raw table value
    pub fn rows_per_frame(&self, gravity: u32, sped_up: bool) -> f64 {
        let (rows, frames) = self.rate(gravity, sped_up);
        f64::from(rows) / f64::from(frames)
    }
}
