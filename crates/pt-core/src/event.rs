//! Start/stop events and their textual formats.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::TrackerError;

/// Storage and input format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage and input format for event timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display format for the time-of-day part of a timestamp.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// The two actions a user can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Stop,
}

impl EventKind {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            _ => Err(TrackerError::InvalidEventKind(s.to_string())),
        }
    }
}

/// A recorded start or stop action.
///
/// `date` is the day the event is filed under. It usually equals `time.date()`,
/// but a start recorded shortly after midnight with a delta may point into the
/// previous day while still belonging to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub date: NaiveDate,
    pub kind: EventKind,
    pub time: NaiveDateTime,
}

impl Event {
    pub const fn new(date: NaiveDate, kind: EventKind, time: NaiveDateTime) -> Self {
        Self { date, kind, time }
    }
}

/// A stored event as listed for a single day, with its row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub id: i64,
    pub time: NaiveDateTime,
    pub kind: EventKind,
}

/// Parses a `YYYY-MM-DD` date literal.
pub fn parse_date(s: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| TrackerError::InvalidDateFormat(s.to_string()))
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp literal.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TrackerError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| TrackerError::InvalidTimestampFormat(s.to_string()))
}
