//! Read-only view of a board, for renderers and the headless driver

use serde::Serialize;

use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Cell codes per row: 0 empty, 1-7 piece kinds, 8 garbage
pub type CodeGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub grid: CodeGrid,
    pub controlling: Option<Piece>,
    pub ghost: Option<Piece>,
    pub queued: Option<Piece>,
    pub held: Option<Piece>,
    pub can_hold: bool,
    pub running: bool,
    pub paused: bool,
    pub sped_up: bool,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub pending_garbage: u32,
    /// Rows per frame
    pub gravity: f64,
    pub lock_remaining_ms: Option<u32>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.running && !self.paused
    }

    /// Occupied cells on the grid (the controlling piece is not counted)
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&code| code != 0).count()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            controlling: None,
            ghost: None,
            queued: None,
            held: None,
            can_hold: true,
            running: false,
            paused: false,
            sped_up: false,
            score: 0,
            level: 0,
            lines: 0,
            combo: 0,
            pending_garbage: 0,
            gravity: 0.0,
            lock_remaining_ms: None,
        }
    }
}
