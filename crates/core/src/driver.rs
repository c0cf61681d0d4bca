//! Frame driver - turns wall-clock frames into gravity steps and lock time
//!
//! Gravity is a rational rate (`rows` steps every `frames` frames). The driver
//! spreads those steps evenly over the frame cycle, rounding up, so a rate of
//! 3 rows per 4 frames yields 1, 1, 1, 0.

use crate::board::GameBoard;
use crate::error::{EngineError, Result};
use crate::types::GameAction;

#[derive(Debug, Clone)]
pub struct FrameDriver {
    rows: u32,
    frames: u32,
    current_frame: u32,
    rows_stepped: u32,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self {
            rows: 0,
            frames: 1,
            current_frame: 0,
            rows_stepped: 0,
        }
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the frame cycle at a new rate
    fn set_rate(&mut self, rows: u32, frames: u32) {
        self.rows = rows;
        self.frames = frames.max(1);
        self.current_frame = 0;
        self.rows_stepped = 0;
    }

    /// Gravity steps due this frame at the current rate
    fn steps_due(&mut self) -> u32 {
        let rows = u64::from(self.rows);
        let frames = u64::from(self.frames);
        let target = (rows * u64::from(self.current_frame + 1)).div_ceil(frames);
        let due = target as u32 - self.rows_stepped;

        self.rows_stepped += due;
        self.current_frame = (self.current_frame + 1) % self.frames;
        if self.current_frame == 0 {
            self.rows_stepped = 0;
        }
        due
    }

    /// Run one frame on `board`: gravity steps, soft-drop accounting, then the
    /// lock countdown. Returns the number of gravity steps applied.
    pub fn frame(&mut self, board: &mut GameBoard) -> u32 {
        if !board.is_running() || board.is_paused() {
            return 0;
        }

        let (rows, frames) = board.gravity_rate();
        if (rows, frames.max(1)) != (self.rows, self.frames) {
            self.set_rate(rows, frames);
        }

        let due = self.steps_due();
        for _ in 0..due {
            board.update();
        }
        if board.is_sped_up() {
            board.count_sped_up_frame();
        }
        board.elapse(board.config().frame_ms);
        due
    }

    pub fn reset(&mut self) {
        self.set_rate(0, 1);
    }
}

/// Parse a comma- or whitespace-separated list of action names
pub fn parse_script(script: &str) -> Result<Vec<GameAction>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            GameAction::from_str(token).ok_or_else(|| EngineError::UnknownAction(token.to_string()))
        })
        .collect()
}
