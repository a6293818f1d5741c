//! Monotonic timestamps for `lastUpdated` and activity events.

use std::sync::Mutex;

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Hands out strictly increasing UTC timestamps at microsecond precision.
#[derive(Debug, Default)]
pub struct Clock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut now = Utc::now().trunc_subsecs(6);
        if let Some(previous) = *last {
            if now <= previous {
                now = previous + Duration::microseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_strictly_increase() {
        let clock = Clock::new();
        let stamps: Vec<_> = (0..1000).map(|_| clock.now()).collect();

        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(stamps[0].timestamp_subsec_nanos() % 1_000, 0);
    }
}
