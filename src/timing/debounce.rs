//! Debouncer - coalesces bursts of events into one delivery
//!
//! Every `schedule` call replaces the pending event and restarts the quiet
//! period. The event is released by `poll` once the quiet period has elapsed
//! without another `schedule`. Dropping the debouncer, or calling `cancel`,
//! discards anything pending.

use std::time::{Duration, Instant};

/// A pending delivery.
#[derive(Debug, Clone)]
struct Pending<E> {
    deadline: Instant,
    event: E,
}

/// Cancellable, clock-injected debouncer.
///
/// # Examples
///
/// ```
/// # use mosaic::timing::Debouncer;
/// # use std::time::{Duration, Instant};
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(5));
///
/// debouncer.schedule(800, start);
/// debouncer.schedule(600, start + Duration::from_millis(2));
///
/// // Still inside the quiet period of the second call.
/// assert_eq!(debouncer.poll(start + Duration::from_millis(6)), None);
/// // Only the latest event survives.
/// assert_eq!(debouncer.poll(start + Duration::from_millis(7)), Some(600));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<E> {
    quiet: Duration,
    pending: Option<Pending<E>>,
}

impl<E> Debouncer<E> {
    /// Create a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Quiet period between the last `schedule` and delivery.
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `event`, replacing whatever was pending and restarting the timer.
    pub fn schedule(&mut self, event: E, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.quiet,
            event,
        });
    }

    /// Release the pending event if its quiet period has elapsed by `now`.
    ///
    /// Fires at most once per burst.
    pub fn poll(&mut self, now: Instant) -> Option<E> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|pending| pending.event)
            }
            _ => None,
        }
    }

    /// Discard any pending event. Returns whether something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether an event is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending event becomes deliverable, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}
