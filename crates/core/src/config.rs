//! Configuration for a board

use crate::error::{EngineError, Result};
use crate::types::{FRAME_MS, LOCK_DELAY_MS};

/// Runtime knobs of a board. Defaults come from the constants in `tetrad-types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Seed of the piece randomizer
    pub seed: u32,

    /// Delay between a piece failing to fall and locking (in milliseconds)
    pub lock_delay_ms: u32,

    /// Frame period the driver advances the lock countdown by (in milliseconds)
    pub frame_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            lock_delay_ms: LOCK_DELAY_MS,
            frame_ms: FRAME_MS,
        }
    }
}

impl BoardConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the randomizer seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the lock delay in milliseconds
    pub fn with_lock_delay_ms(mut self, lock_delay_ms: u32) -> Self {
        self.lock_delay_ms = lock_delay_ms;
        self
    }

    /// Set the frame period in milliseconds
    pub fn with_frame_ms(mut self, frame_ms: u32) -> Self {
        self.frame_ms = frame_ms;
        self
    }

    /// Reject settings the driver cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "frame period must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }
}
