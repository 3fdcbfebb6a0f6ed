//! Storage layer for the work session tracker.
//!
//! Provides an [`EventStore`] backed by `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! One `Database` is opened per command and dropped when the command returns, which
//! closes the connection on every exit path. Several processes writing to the same
//! file at once are not coordinated: two concurrent `start` commands can both pass
//! validation before either one is written.
//!
//! # Schema
//!
//! A single `timestamps` table holds every event. Dates are stored as TEXT
//! `YYYY-MM-DD`, times as TEXT `YYYY-MM-DD HH:MM:SS` in local wall-clock time.
//! Both formats order lexicographically in chronological order, so sorting is
//! done by SQLite on the raw text.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use pt_core::event::{DATE_FORMAT, TIMESTAMP_FORMAT};
use pt_core::{Event, EventKind, EventRow, EventStore, SortOrder};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored time could not be parsed.
    #[error("invalid timestamp in row {row_id}: {value}")]
    TimestampParse {
        row_id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored kind is neither `start` nor `stop`.
    #[error("invalid event kind in row {row_id}: {value}")]
    InvalidEventKind { row_id: i64, value: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- date: day the event is filed under ('2024-01-15')
            -- time: local wall-clock timestamp ('2024-01-15 08:30:00')
            CREATE TABLE IF NOT EXISTS timestamps (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('start', 'stop')),
                time TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_timestamps_date_time ON timestamps(date, time);
            ",
        )?;
        Ok(())
    }
}

impl EventStore for Database {
    type Error = DbError;

    fn append(&mut self, event: &Event) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO timestamps (date, kind, time) VALUES (?, ?, ?)",
            params![
                format_date(event.date),
                event.kind.as_str(),
                format_time(event.time),
            ],
        )?;
        Ok(())
    }

    fn times_for(
        &self,
        date: NaiveDate,
        kind: EventKind,
        order: SortOrder,
    ) -> Result<Vec<NaiveDateTime>, DbError> {
        let sql = match order {
            SortOrder::Ascending => {
                "SELECT id, time FROM timestamps WHERE date = ? AND kind = ? ORDER BY time ASC, id ASC"
            }
            SortOrder::Descending => {
                "SELECT id, time FROM timestamps WHERE date = ? AND kind = ? ORDER BY time DESC, id DESC"
            }
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![format_date(date), kind.as_str()], |row| {
            let id: i64 = row.get(0)?;
            let time: String = row.get(1)?;
            Ok((id, time))
        })?;
        let mut times = Vec::new();
        for row in rows {
            let (id, time) = row?;
            times.push(parse_time(id, time)?);
        }
        Ok(times)
    }

    fn last_event_kind(&self, date: NaiveDate) -> Result<Option<EventKind>, DbError> {
        let last: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, kind FROM timestamps WHERE date = ? ORDER BY time DESC, id DESC LIMIT 1",
                [format_date(date)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        last.map(|(id, kind)| parse_kind(id, kind)).transpose()
    }

    fn rows_for(&self, date: NaiveDate) -> Result<Vec<EventRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, time, kind
            FROM timestamps
            WHERE date = ?
            ORDER BY time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([format_date(date)], |row| {
            let id: i64 = row.get(0)?;
            let time: String = row.get(1)?;
            let kind: String = row.get(2)?;
            Ok((id, time, kind))
        })?;
        let mut events = Vec::new();
        for row in rows {
            let (id, time, kind) = row?;
            events.push(EventRow {
                id,
                time: parse_time(id, time)?,
                kind: parse_kind(id, kind)?,
            });
        }
        Ok(events)
    }

    fn delete_row(&mut self, id: i64) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM timestamps WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_time(row_id: i64, value: String) -> Result<NaiveDateTime, DbError> {
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT).map_err(|source| {
        DbError::TimestampParse {
            row_id,
            value,
            source,
        }
    })
}

fn parse_kind(row_id: i64, value: String) -> Result<EventKind, DbError> {
    value
        .parse()
        .map_err(|_| DbError::InvalidEventKind { row_id, value })
}
