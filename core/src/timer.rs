use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Seconds;

/// Wall-clock span of one game, from the first flip until the last pair is found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTimer {
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
}

impl SessionTimer {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            stopped_at: None,
        }
    }

    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub const fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Records the start time unless the timer already started.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            log::debug!("timer started at {}", now);
            self.started_at = Some(now);
        }
    }

    /// Freezes the elapsed time. A timer that never started stays at zero.
    pub fn stop(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            log::debug!("timer stopped at {}", now);
            self.stopped_at = Some(now);
        }
    }

    /// How many whole seconds have passed since the start, 0 if it hasn't started
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> Seconds {
        if let Some(started_at) = self.started_at {
            (self.stopped_at.unwrap_or(now) - started_at)
                .num_seconds()
                .clamp(0, Seconds::MAX.into()) as Seconds
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn unstarted_timer_reads_zero() {
        let timer = SessionTimer::new();

        assert_eq!(timer.elapsed_secs(at(100)), 0);
    }

    #[test]
    fn elapsed_is_floored_to_whole_seconds() {
        let mut timer = SessionTimer::new();
        timer.start(at(0));

        assert_eq!(timer.elapsed_secs(at(2) + TimeDelta::milliseconds(999)), 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = SessionTimer::new();
        timer.start(at(0));
        timer.start(at(50));

        assert_eq!(timer.elapsed_secs(at(60)), 60);
    }

    #[test]
    fn stop_freezes_elapsed_time() {
        let mut timer = SessionTimer::new();
        timer.start(at(0));
        timer.stop(at(42));
        timer.stop(at(90));

        assert!(timer.is_stopped());
        assert_eq!(timer.elapsed_secs(at(1000)), 42);
    }

    #[test]
    fn clock_going_backwards_reads_zero() {
        let mut timer = SessionTimer::new();
        timer.start(at(10));

        assert_eq!(timer.elapsed_secs(at(5)), 0);
    }

    #[test]
    fn stop_before_start_is_ignored() {
        let mut timer = SessionTimer::new();
        timer.stop(at(3));
        timer.start(at(5));

        assert!(!timer.is_stopped());
        assert_eq!(timer.elapsed_secs(at(8)), 3);
    }
}
