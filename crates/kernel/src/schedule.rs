use std::time::Duration;

/// Fixed-delay, one-shot tick timer, re-armed by the frame that just ran.
///
/// Deadlines are `now + interval` from the moment of arming, so slow frames
/// push later ticks back instead of being made up. Once cancelled it never
/// fires again.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: Duration,
    next: Option<Duration>,
    cancelled: bool,
    fired: u64,
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
            cancelled: false,
            fired: 0,
        }
    }

    /// Fire on the first poll at or after `now`.
    pub fn start(&mut self, now: Duration) {
        if !self.cancelled {
            self.next = Some(now);
        }
    }

    /// Schedule the next tick one interval after `now`.
    pub fn arm(&mut self, now: Duration) {
        if !self.cancelled {
            self.next = Some(now + self.interval);
        }
    }

    /// Pending deadline, if armed.
    pub fn deadline(&self) -> Option<Duration> {
        self.next
    }

    pub fn is_due(&self, now: Duration) -> bool {
        !self.cancelled && self.next.is_some_and(|at| now >= at)
    }

    /// Consume a due tick. The caller runs the frame and re-arms.
    pub fn take_due(&mut self, now: Duration) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next = None;
        self.fired += 1;
        true
    }

    pub fn cancel(&mut self) {
        if !self.cancelled {
            tracing::debug!(fired = self.fired, "tick schedule cancelled");
        }
        self.cancelled = true;
        self.next = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Ticks consumed so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}
