//! Garbage inbox - the one piece of state two linked boards share
//!
//! Each board owns an inbox counting the garbage lines it still owes itself.
//! Linking hands the opponent a clone of the handle, so the opponent can post
//! credits without owning (or even seeing) the board. The counter is atomic:
//! two boards may tick on different threads.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Shared, atomically updated count of pending garbage lines
#[derive(Debug, Clone, Default)]
pub struct GarbageInbox {
    pending: Arc<AtomicU32>,
}

impl GarbageInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `lines` owed lines
    pub fn credit(&self, lines: u32) {
        if lines == 0 {
            return;
        }
        let _ = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |p| {
                Some(p.saturating_add(lines))
            });
    }

    /// Lines currently owed
    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Drain the inbox, returning what was owed
    pub fn take(&self) -> u32 {
        self.pending.swap(0, Ordering::AcqRel)
    }

    /// Cancel up to `lines` owed lines. Returns how many were cancelled.
    pub fn cancel(&self, lines: u32) -> u32 {
        let previous = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |p| {
                Some(p - p.min(lines))
            })
            .unwrap_or_else(|p| p);
        previous.min(lines)
    }

    /// Whether both handles point at the same counter
    pub fn same_as(&self, other: &GarbageInbox) -> bool {
        Arc::ptr_eq(&self.pending, &other.pending)
    }
}
