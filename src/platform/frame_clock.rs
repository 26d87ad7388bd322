/// Display-refresh scheduling for the native main loop.

use std::time::{Duration, Instant};

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Host primitive that fires a callback once before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Fixed-interval frame scheduler.
///
/// Holds at most one outstanding request; a newer request supersedes the
/// previous one. A handle is released by [`FrameClock::poll`] exactly once.
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    pending: Option<FrameHandle>,
    last_fire: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
            last_fire: None,
        }
    }

    /// Release the pending request if a refresh interval has passed.
    pub fn poll(&mut self, now: Instant) -> Option<FrameHandle> {
        if !self.is_due(now) {
            return None;
        }
        let handle = self.pending.take()?;
        self.last_fire = Some(now);
        Some(handle)
    }

    /// Time left until the pending request becomes due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match (self.pending, self.last_fire) {
            (None, _) => self.interval,
            (Some(_), None) => Duration::ZERO,
            (Some(_), Some(last)) => (last + self.interval).saturating_duration_since(now),
        }
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn is_due(&self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_pending() {
        let mut clock = FrameClock::new(Duration::from_millis(16));
        assert_eq!(clock.poll(Instant::now()), None);
        assert!(!clock.has_pending());
    }

    #[test]
    fn test_first_request_fires_immediately() {
        let mut clock = FrameClock::new(Duration::from_millis(16));
        let handle = clock.request_frame();
        let now = Instant::now();
        assert_eq!(clock.time_until_next(now), Duration::ZERO);
        assert_eq!(clock.poll(now), Some(handle));
        // Fired handles are not released twice.
        assert_eq!(clock.poll(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_interval_gates_next_frame() {
        let mut clock = FrameClock::new(Duration::from_millis(16));
        let t0 = Instant::now();
        clock.request_frame();
        assert!(clock.poll(t0).is_some());

        let second = clock.request_frame();
        assert_eq!(clock.poll(t0 + Duration::from_millis(5)), None);
        assert_eq!(
            clock.time_until_next(t0 + Duration::from_millis(5)),
            Duration::from_millis(11)
        );
        assert_eq!(clock.poll(t0 + Duration::from_millis(16)), Some(second));
    }

    #[test]
    fn test_cancel() {
        let mut clock = FrameClock::new(Duration::ZERO);
        let handle = clock.request_frame();
        clock.cancel_frame(handle);
        assert_eq!(clock.poll(Instant::now()), None);
        // Cancelling again is harmless.
        clock.cancel_frame(handle);
    }

    #[test]
    fn test_cancel_stale_handle_keeps_newer_request() {
        let mut clock = FrameClock::new(Duration::ZERO);
        let old = clock.request_frame();
        let new = clock.request_frame();
        assert_ne!(old, new);
        clock.cancel_frame(old);
        assert_eq!(clock.poll(Instant::now()), Some(new));
    }
}
