//! Poll tick scheduling
//!
//! The host owns the actual timer (an event loop, a sleep loop, a
//! framework clock). [`PollScheduler`] only answers "is a read due now?"
//! and "how long until the next one?".

use std::time::{Duration, Instant};

/// Default delay between polling reads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(4);

/// Fixed-interval tick scheduler
#[derive(Debug, Clone)]
pub struct PollScheduler {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl PollScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the scheduler; the first tick is due immediately
    ///
    /// Starting an already running scheduler keeps its pending tick.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now);
        }
    }

    /// Cancel the pending tick
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume the pending tick if it is due, arming the next one
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(deadline) if now >= deadline => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, `None` when stopped
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_never_due() {
        let mut scheduler = PollScheduler::default();
        let now = Instant::now();
        assert!(!scheduler.is_running());
        assert!(!scheduler.due(now));
        assert_eq!(scheduler.time_until_due(now), None);
    }

    #[test]
    fn test_first_tick_immediate_then_interval() {
        let mut scheduler = PollScheduler::new(Duration::from_millis(5));
        let t0 = Instant::now();
        scheduler.start(t0);

        assert!(scheduler.due(t0));
        assert!(!scheduler.due(t0), "Tick consumed");
        assert!(!scheduler.due(t0 + Duration::from_millis(4)));
        assert_eq!(
            scheduler.time_until_due(t0 + Duration::from_millis(2)),
            Some(Duration::from_millis(3))
        );
        assert!(scheduler.due(t0 + Duration::from_millis(5)));
    }

    #[test]
    fn test_late_tick_rearms_from_now() {
        let mut scheduler = PollScheduler::new(Duration::from_millis(5));
        let t0 = Instant::now();
        scheduler.start(t0);
        assert!(scheduler.due(t0));

        // Host stalled for 50ms: one tick, not ten
        let late = t0 + Duration::from_millis(50);
        assert!(scheduler.due(late));
        assert!(!scheduler.due(late));
        assert_eq!(scheduler.time_until_due(late), Some(Duration::from_millis(5)));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let mut scheduler = PollScheduler::new(Duration::from_millis(5));
        let t0 = Instant::now();
        scheduler.start(t0);
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!scheduler.due(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_restart_keeps_pending_tick() {
        let mut scheduler = PollScheduler::new(Duration::from_millis(5));
        let t0 = Instant::now();
        scheduler.start(t0);
        assert!(scheduler.due(t0));

        scheduler.start(t0 + Duration::from_millis(1));
        assert!(!scheduler.due(t0 + Duration::from_millis(1)));
    }
}
