//! Worked and paused time derived from a day's start/stop timestamps.
//!
//! Sessions are never stored. They are rebuilt at read time by pairing the
//! n-th start with the n-th stop of the day, both in ascending order.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::TrackerError;

/// Ascending start and stop timestamps of a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTimes {
    pub date: NaiveDate,
    pub starts: Vec<NaiveDateTime>,
    pub stops: Vec<NaiveDateTime>,
}

impl DayTimes {
    pub const fn new(date: NaiveDate, starts: Vec<NaiveDateTime>, stops: Vec<NaiveDateTime>) -> Self {
        Self {
            date,
            starts,
            stops,
        }
    }

    /// Returns whether the day ends with a start that has no matching stop.
    pub fn is_open(&self) -> bool {
        self.starts.len() > self.stops.len()
    }

    /// Sums the length of every session of the day.
    ///
    /// An open session is closed with `now`. Pairing stops at the shorter of the
    /// two sequences, so surplus starts beyond the synthesized stop contribute
    /// nothing. A stop earlier than its paired start subtracts.
    pub fn worked(&self, now: NaiveDateTime) -> Result<Duration, TrackerError> {
        if self.starts.is_empty() {
            return Err(TrackerError::NoData { date: self.date });
        }

        let now_stop = self.is_open().then_some(now);
        let stops = self.stops.iter().copied().chain(now_stop);

        Ok(self
            .starts
            .iter()
            .zip(stops)
            .fold(Duration::zero(), |total, (start, stop)| {
                total + (stop - *start)
            }))
    }

    /// Sums the gaps between each stop and the start that follows it.
    ///
    /// Returns `None` when the day has no stop at all. A trailing stop without a
    /// following start adds nothing.
    pub fn paused(&self) -> Option<Duration> {
        if self.stops.is_empty() {
            return None;
        }

        Some(
            self.starts
                .iter()
                .skip(1)
                .zip(&self.stops)
                .fold(Duration::zero(), |total, (start, stop)| {
                    total + (*start - *stop)
                }),
        )
    }
}
