//! The event store collaborator.

use chrono::{NaiveDate, NaiveDateTime};

use crate::event::{Event, EventKind, EventRow};

/// Sort direction for timestamp queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordered, per-date storage of start/stop events.
///
/// Every query is scoped by an explicit `date`. Implementations are
/// append-only apart from [`EventStore::delete_row`].
pub trait EventStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists one event exactly as given.
    fn append(&mut self, event: &Event) -> Result<(), Self::Error>;

    /// Returns the timestamps of all `kind` events on `date`.
    fn times_for(
        &self,
        date: NaiveDate,
        kind: EventKind,
        order: SortOrder,
    ) -> Result<Vec<NaiveDateTime>, Self::Error>;

    /// Returns the kind of the latest event on `date`, if any.
    fn last_event_kind(&self, date: NaiveDate) -> Result<Option<EventKind>, Self::Error>;

    /// Lists all events on `date` ordered by time.
    fn rows_for(&self, date: NaiveDate) -> Result<Vec<EventRow>, Self::Error>;

    /// Deletes a row by identifier. Returns `true` iff a row was removed.
    fn delete_row(&mut self, id: i64) -> Result<bool, Self::Error>;
}
