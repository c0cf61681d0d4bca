//! Lock scheduler - the one-shot, cancelable lock delay
//!
//! A board holds at most one pending lock. Arming while one is pending keeps
//! the original deadline; cancelling drops it. The countdown only moves when
//! the driver advances it, so a paused board keeps its pending lock exactly
//! where it left off.

/// Countdown handle for a deferred lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockTimer {
    remaining_ms: Option<u32>,
}

impl LockTimer {
    pub fn new() -> Self {
        Self { remaining_ms: None }
    }

    /// Schedule a lock `delay_ms` from now, unless one is already pending.
    /// Returns true if a new lock was scheduled.
    pub fn arm(&mut self, delay_ms: u32) -> bool {
        if self.remaining_ms.is_some() {
            return false;
        }
        self.remaining_ms = Some(delay_ms);
        true
    }

    /// Drop the pending lock, if any
    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Time left before the pending lock fires
    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Advance the countdown. Returns true exactly once per armed lock, when
    /// it runs out; the handle is cleared at that point.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        let remaining = remaining.saturating_sub(elapsed_ms);
        if remaining == 0 {
            self.remaining_ms = None;
            true
        } else {
            self.remaining_ms = Some(remaining);
            false
        }
    }
}
