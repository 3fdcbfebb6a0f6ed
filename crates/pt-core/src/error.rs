//! Error taxonomy shared by the validators, calculators and the tracker.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::event::EventKind;

/// Boxed error raised by an [`EventStore`](crate::EventStore) implementation.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while recording or evaluating work sessions.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The candidate is not strictly after the latest event of the same kind.
    #[error("timestamp collision: {kind} at {candidate} is not after {latest}")]
    TimestampCollision {
        kind: EventKind,
        candidate: NaiveDateTime,
        latest: NaiveDateTime,
    },

    /// The requested event would repeat the previous one (or stop before any start).
    #[error("cannot record {requested} after {}", .last.map_or("nothing", |k| k.as_str()))]
    InvalidTransition {
        last: Option<EventKind>,
        requested: EventKind,
    },

    /// No start event exists for the date.
    #[error("no start events recorded on {date}")]
    NoData { date: NaiveDate },

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("invalid timestamp format: {0}")]
    InvalidTimestampFormat(String),

    #[error("invalid event kind: {0}")]
    InvalidEventKind(String),

    /// A deletion affected zero rows.
    #[error("no row with id {0}")]
    RowNotFound(i64),

    /// The event store failed.
    #[error("event store error: {0}")]
    Store(#[source] StoreError),
}

impl TrackerError {
    /// Wraps a store implementation error.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}
