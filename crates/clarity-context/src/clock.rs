//! Wall-clock abstraction so time-based sources can be tested

use chrono::{Local, NaiveTime};

/// Local time-of-day provider
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Reads the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    /// Clock stuck at `hour:minute`; out-of-range values fall back to midnight
    pub fn at(hour: u32, minute: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(14, 30);
        assert_eq!(clock.now().hour(), 14);
        assert_eq!(clock.now().minute(), 30);
    }

    #[test]
    fn test_fixed_clock_out_of_range() {
        assert_eq!(FixedClock::at(25, 0).now(), NaiveTime::MIN);
    }
}
