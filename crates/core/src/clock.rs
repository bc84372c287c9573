//! Timestamp source for created rows.

use std::fmt::Debug;

use chrono::{Local, NaiveDateTime, Timelike as _};

use crate::constants::TIMESTAMP_FORMAT;

/// Wall-clock collaborator. Injected into the store so tests can pin time.
pub trait Clock: Debug + Send + Sync {
    /// Current local time, truncated to whole seconds.
    fn now(&self) -> NaiveDateTime;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render a timestamp in the persisted layout.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a persisted timestamp.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}
