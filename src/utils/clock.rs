// src/utils/clock.rs
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use std::fmt;

/// Source of "today" for the home screen and of the instant stamped on
/// completions, payouts, status changes and generated IDs.
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
    fn now(&self) -> DateTime<Utc>;
}

/// Uses the device's local calendar date.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pinned date for tests and replays. The instant is midnight UTC of that date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_fixed_clock_now_agrees_with_today() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let clock = FixedClock(date);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().date_naive(), clock.today());
        assert_eq!(clock.now().to_rfc3339(), "2025-09-03T00:00:00+00:00");
    }
}
