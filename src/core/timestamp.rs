//! Clock sources and time-of-day formatting
//!
//! Log lines carry the local wall-clock time as `HH:mm:ss.SSS`; log entries
//! carry the raw milliseconds since the Unix epoch.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;

/// strftime pattern for the console prefix: 24-hour clock, 3 fractional digits
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S%.3f";

/// Source of the current time in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a fixed instant
///
/// # Examples
///
/// ```
/// use app_logger::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1537838479252);
/// assert_eq!(clock.now_millis(), 1537838479252);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Format epoch milliseconds as local `HH:mm:ss.SSS`
#[must_use]
pub fn format_time_of_day(millis: i64) -> String {
    format_time_of_day_in(millis, &Local)
}

/// Format epoch milliseconds as `HH:mm:ss.SSS` in the given time zone
///
/// Out-of-range instants fall back to the Unix epoch rather than failing.
#[must_use]
pub fn format_time_of_day_in<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let utc = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default();
    utc.with_timezone(tz).format(TIME_OF_DAY_FORMAT).to_string()
}

/// Console line prefix: `[HH:mm:ss.SSS app_name.module_name]`
#[must_use]
pub fn format_prefix(millis: i64, app_name: &str, module_name: &str) -> String {
    format!("[{} {}.{}]", format_time_of_day(millis), app_name, module_name)
}
