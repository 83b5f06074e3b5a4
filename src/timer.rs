//! Cooperative one-shot timers.
//!
//! Nothing here spawns a thread. A [`Deadline`] is a value that the owner
//! polls from the main loop tick; firing and cancellation therefore happen on
//! the same execution context, so a cancelled deadline can never fire later.

use std::time::{Duration, Instant};

/// A cancellable one-shot deadline.
///
/// Cancellation is idempotent, and [`Deadline::fire`] returns `true` at most
/// once over the lifetime of the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self(Some(now + delay))
    }

    pub fn armed(&self) -> bool {
        self.0.is_some()
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }

    /// Consume the deadline if it has elapsed. Returns `false` forever after
    /// the first `true`, and always `false` once cancelled.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.0 {
            Some(at) if now >= at => {
                self.0 = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once() {
        let t0 = Instant::now();
        let mut d = Deadline::after(t0, Duration::from_secs(1));
        assert!(!d.fire(t0));
        assert!(!d.fire(t0 + Duration::from_millis(999)));
        assert!(d.fire(t0 + Duration::from_secs(1)));
        assert!(!d.fire(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn cancel_is_idempotent_and_final() {
        let t0 = Instant::now();
        let mut d = Deadline::after(t0, Duration::from_secs(1));
        d.cancel();
        d.cancel();
        assert!(!d.armed());
        assert!(!d.fire(t0 + Duration::from_secs(5)));
    }
}
