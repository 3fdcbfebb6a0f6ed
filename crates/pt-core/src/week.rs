//! Week aggregation.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::error::TrackerError;

/// Longest backward walk: the reference day plus six earlier days.
const MAX_OFFSET_DAYS: i64 = 6;

/// Worked time of one day in a week summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    #[serde(rename = "worked_seconds", serialize_with = "serialize_seconds")]
    pub worked: Duration,
}

fn serialize_seconds<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_i64(duration.num_seconds())
}

/// Returns whether two dates fall into the same ISO-8601 week.
///
/// Compares week-based year and week number, so the first days of January can
/// belong to the last week of the previous year.
pub fn same_iso_week(a: NaiveDate, b: NaiveDate) -> bool {
    a.iso_week() == b.iso_week()
}

/// Walks backward from `reference` and collects the worked time of every day
/// in the same ISO week.
///
/// The walk stops at the first day that belongs to a different week. Days for
/// which `worked` reports [`TrackerError::NoData`] are left out; any other error
/// aborts the walk. Entries are ordered most recent first.
pub fn week_summary<F>(reference: NaiveDate, mut worked: F) -> Result<Vec<DayTotal>, TrackerError>
where
    F: FnMut(NaiveDate) -> Result<Duration, TrackerError>,
{
    let mut days = Vec::new();
    for offset in 0..=MAX_OFFSET_DAYS {
        let date = reference - Duration::days(offset);
        if !same_iso_week(date, reference) {
            break;
        }
        match worked(date) {
            Ok(worked) => days.push(DayTotal { date, worked }),
            Err(TrackerError::NoData { .. }) => {
                tracing::debug!(%date, "no sessions recorded, skipping day");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(days)
}

/// Sums the worked time of all entries.
pub fn week_total(days: &[DayTotal]) -> Duration {
    days.iter()
        .fold(Duration::zero(), |total, day| total + day.worked)
}
