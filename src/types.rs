//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision. Defaults to midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid time of day '{0}', expected HH:MM")]
pub struct ParseTimeError(pub String);

impl TimeOfDay {
    /// Returns `None` when `hour` or `minute` is out of range.
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 { Some(Self { hour, minute }) } else { None }
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Parses rendered slot text leniently.
    ///
    /// Surrounding whitespace is ignored and a single-digit hour (`4:05`) is
    /// accepted.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let (hour, minute) = text.trim().split_once(':')?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return None;
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Self::new(hour.parse().ok()?, minute.parse().ok()?)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| ParseTimeError(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl From<chrono::NaiveTime> for TimeOfDay {
    #[allow(clippy::cast_possible_truncation)]
    fn from(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        // chrono guarantees hour < 24 and minute < 60
        Self { hour: time.hour() as u8, minute: time.minute() as u8 }
    }
}
