/// Coalescing of viewport resize notifications.

use crate::core::types::Size;
use std::time::{Duration, Instant};

/// Holds resize notifications until the viewport has been quiet for
/// `interval`. A zero interval passes every notification straight through.
pub struct ResizeThrottle {
    interval: Duration,
    pending: Vec<Size>,
    last_event: Option<Instant>,
}

impl ResizeThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Vec::new(),
            last_event: None,
        }
    }

    pub fn notify(&mut self, size: Size, now: Instant) {
        if !self.interval.is_zero() {
            self.pending.clear();
        }
        self.pending.push(size);
        self.last_event = Some(now);
    }

    /// Sizes ready to apply, oldest first.
    pub fn take_ready(&mut self, now: Instant) -> Vec<Size> {
        let quiet = match self.last_event {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if quiet {
            std::mem::take(&mut self.pending)
        } else {
            Vec::new()
        }
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
