//! Wall-clock source.
//!
//! The ritual timer never reads the time itself; the controller passes
//! `now_ms` in. Swapping [`SystemClock`] for [`ManualClock`] makes every
//! time-driven transition deterministic under test.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Calendar date (UTC) used to stamp history entries.
    fn today(&self) -> NaiveDate {
        date_of(self.now_ms())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn set_ms(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_ms(secs * 1000);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Convert epoch milliseconds to a UTC timestamp, saturating to "now" for
/// values chrono cannot represent.
pub fn datetime_of(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

fn date_of(ms: u64) -> NaiveDate {
    datetime_of(ms).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1_000);
        clock.advance_secs(61);
        assert_eq!(clock.now_ms(), 62_000);
        clock.set_ms(5);
        assert_eq!(clock.now_ms(), 5);
    }

    #[test]
    fn today_is_utc_calendar_date() {
        // 2024-05-29T23:59:59Z
        let clock = ManualClock::new(1_717_027_199_000);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 5, 29).unwrap());
        clock.advance_secs(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 5, 30).unwrap());
    }
}
