//! Core domain logic for the work session tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Validation: deciding whether a new start/stop event may be written
//! - Durations: pairing a day's starts and stops into worked and paused time
//! - Weeks: aggregating worked time over the current ISO week
//! - Storage seam: the [`EventStore`] trait implemented by `pt-db`

mod duration;
mod error;
pub mod event;
mod store;
mod tracker;
pub mod validate;
pub mod week;

pub use duration::DayTimes;
pub use error::{StoreError, TrackerError};
pub use event::{Event, EventKind, EventRow, parse_date, parse_timestamp};
pub use store::{EventStore, SortOrder};
pub use tracker::Tracker;
pub use week::{DayTotal, week_summary, week_total};
