use std::time::{Duration, Instant};

/// The single pending "clear the cursor" deadline.
///
/// Scheduling replaces any earlier deadline; the host drives it by calling
/// [`RemovalTimer::fire_if_due`] from its event loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RemovalTimer {
    deadline: Option<Instant>,
}

impl RemovalTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clears and reports the deadline once `now` has reached it.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
