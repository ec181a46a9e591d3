//! Simulated clock
//!
//! Simulated time trails real time by a lookback window and jumps forward a
//! random number of minutes per tick. Once it catches up with real time it is
//! rewound to where it started, so the stream never reports future events.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cursor of simulated time, threaded through ticks by value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    initial: DateTime<Utc>,
    current: DateTime<Utc>,
}

impl SimulationClock {
    /// Start a clock `lookback` before `real_now`
    pub fn starting_at(real_now: DateTime<Utc>, lookback: Duration) -> Self {
        let initial = real_now - lookback;
        Self { initial, current: initial }
    }

    /// Where the clock started, and where it rewinds to
    pub fn initial(&self) -> DateTime<Utc> {
        self.initial
    }

    /// Current simulated time
    pub fn now(&self) -> DateTime<Utc> {
        self.current
    }

    /// Rewind to the start if simulated time has overtaken `real_now`
    ///
    /// Returns the resulting clock and whether a rewind happened. A clock equal
    /// to `real_now` is kept.
    pub fn rewind_if_ahead(self, real_now: DateTime<Utc>) -> (Self, bool) {
        if self.current > real_now {
            (Self { current: self.initial, ..self }, true)
        } else {
            (self, false)
        }
    }

    /// Move simulated time forward
    pub fn advance(self, minutes: i64) -> Self {
        Self { current: self.current + Duration::minutes(minutes), ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn real_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_starts_lookback_before_now() {
        let clock = SimulationClock::starting_at(real_now(), Duration::days(30));
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 7, 16, 12, 0, 0).unwrap());
        assert_eq!(clock.initial(), clock.now());
    }

    #[test]
    fn test_rewind_only_when_ahead() {
        let clock = SimulationClock::starting_at(real_now(), Duration::days(1));

        let at_now = clock.advance(24 * 60);
        assert_eq!(at_now.rewind_if_ahead(real_now()), (at_now, false));

        let ahead = at_now.advance(1);
        let (rewound, did_rewind) = ahead.rewind_if_ahead(real_now());
        assert!(did_rewind);
        assert_eq!(rewound.now(), clock.initial());
        assert_eq!(rewound.initial(), clock.initial());
    }
}
