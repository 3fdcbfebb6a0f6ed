//! Recording and reporting on top of an [`EventStore`].

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::duration::DayTimes;
use crate::error::TrackerError;
use crate::event::{Event, EventKind, EventRow};
use crate::store::{EventStore, SortOrder};
use crate::validate::{check_timestamp, check_transition};
use crate::week::{DayTotal, week_summary};

/// Work session tracker backed by an event store.
///
/// Owns the store for the duration of one command. Every method takes the date
/// it operates on, so results do not depend on call order.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
}

impl<S: EventStore> Tracker<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Records a `start` or `stop` filed under `date` at time `at`.
    ///
    /// Refused with [`TrackerError::InvalidTransition`] when it would repeat the
    /// previous event, and with [`TrackerError::TimestampCollision`] when `at` is
    /// not after the latest event of the same kind.
    pub fn record(
        &mut self,
        date: NaiveDate,
        kind: EventKind,
        at: NaiveDateTime,
    ) -> Result<Event, TrackerError> {
        let last = self.last_event_kind(date)?;
        if let Err(err) = check_transition(last, kind) {
            tracing::info!(%date, %kind, ?last, "event refused: invalid transition");
            return Err(err);
        }

        let latest = self.latest_time(date, kind)?;
        if let Err(err) = check_timestamp(kind, at, latest) {
            tracing::info!(%date, %kind, %at, ?latest, "event refused: timestamp collision");
            return Err(err);
        }

        self.append(Event::new(date, kind, at))
    }

    /// Appends an event without consulting either validator.
    ///
    /// The event is filed under the date of its own timestamp.
    pub fn add_raw(&mut self, kind: EventKind, at: NaiveDateTime) -> Result<Event, TrackerError> {
        self.append(Event::new(at.date(), kind, at))
    }

    fn append(&mut self, event: Event) -> Result<Event, TrackerError> {
        self.store.append(&event).map_err(TrackerError::store)?;
        tracing::debug!(date = %event.date, kind = %event.kind, time = %event.time, "event recorded");
        Ok(event)
    }

    /// Deletes a stored event by row identifier.
    pub fn delete(&mut self, id: i64) -> Result<(), TrackerError> {
        if self.store.delete_row(id).map_err(TrackerError::store)? {
            tracing::debug!(id, "row deleted");
            Ok(())
        } else {
            Err(TrackerError::RowNotFound(id))
        }
    }

    pub fn last_event_kind(&self, date: NaiveDate) -> Result<Option<EventKind>, TrackerError> {
        self.store.last_event_kind(date).map_err(TrackerError::store)
    }

    /// Returns the newest timestamp of `kind` on `date`.
    pub fn latest_time(
        &self,
        date: NaiveDate,
        kind: EventKind,
    ) -> Result<Option<NaiveDateTime>, TrackerError> {
        let times = self
            .store
            .times_for(date, kind, SortOrder::Descending)
            .map_err(TrackerError::store)?;
        Ok(times.first().copied())
    }

    /// Loads the ascending start and stop timestamps of `date`.
    pub fn day(&self, date: NaiveDate) -> Result<DayTimes, TrackerError> {
        let starts = self
            .store
            .times_for(date, EventKind::Start, SortOrder::Ascending)
            .map_err(TrackerError::store)?;
        let stops = self
            .store
            .times_for(date, EventKind::Stop, SortOrder::Ascending)
            .map_err(TrackerError::store)?;
        Ok(DayTimes::new(date, starts, stops))
    }

    pub fn rows(&self, date: NaiveDate) -> Result<Vec<EventRow>, TrackerError> {
        self.store.rows_for(date).map_err(TrackerError::store)
    }

    /// Total worked time on `date`, closing an open session at `now`.
    pub fn worked(&self, date: NaiveDate, now: NaiveDateTime) -> Result<Duration, TrackerError> {
        self.day(date)?.worked(now)
    }

    /// Total paused time on `date`, or `None` if nothing was stopped yet.
    pub fn paused(&self, date: NaiveDate) -> Result<Option<Duration>, TrackerError> {
        Ok(self.day(date)?.paused())
    }

    /// Worked time for each day of the ISO week of `reference`, up to and
    /// including `reference`, most recent first.
    pub fn week(
        &self,
        reference: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<Vec<DayTotal>, TrackerError> {
        week_summary(reference, |date| self.worked(date, now))
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    /// Vec-backed store mirroring the ordering rules of the SQLite store.
    #[derive(Debug, Default)]
    struct MemoryStore {
        next_id: i64,
        rows: Vec<(i64, Event)>,
    }

    impl MemoryStore {
        fn sorted_for(&self, date: NaiveDate) -> Vec<(i64, Event)> {
            let mut rows: Vec<_> = self
                .rows
                .iter()
                .filter(|(_, e)| e.date == date)
                .copied()
                .collect();
            rows.sort_by_key(|(id, e)| (e.time, *id));
            rows
        }
    }

    impl EventStore for MemoryStore {
        type Error = Infallible;

        fn append(&mut self, event: &Event) -> Result<(), Self::Error> {
            self.next_id += 1;
            self.rows.push((self.next_id, *event));
            Ok(())
        }

        fn times_for(
            &self,
            date: NaiveDate,
            kind: EventKind,
            order: SortOrder,
        ) -> Result<Vec<NaiveDateTime>, Self::Error> {
            let mut times: Vec<_> = self
                .sorted_for(date)
                .into_iter()
                .filter(|(_, e)| e.kind == kind)
                .map(|(_, e)| e.time)
                .collect();
            if order == SortOrder::Descending {
                times.reverse();
            }
            Ok(times)
        }

        fn last_event_kind(&self, date: NaiveDate) -> Result<Option<EventKind>, Self::Error> {
            Ok(self.sorted_for(date).last().map(|(_, e)| e.kind))
        }

        fn rows_for(&self, date: NaiveDate) -> Result<Vec<EventRow>, Self::Error> {
            Ok(self
                .sorted_for(date)
                .into_iter()
                .map(|(id, e)| EventRow {
                    id,
                    time: e.time,
                    kind: e.kind,
                })
                .collect())
        }

        fn delete_row(&mut self, id: i64) -> Result<bool, Self::Error> {
            let before = self.rows.len();
            self.rows.retain(|(row_id, _)| *row_id != id);
            Ok(self.rows.len() < before)
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        crate::event::parse_timestamp(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        crate::event::parse_date(s).unwrap()
    }

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::new(MemoryStore::default())
    }

    #[test]
    fn records_a_full_day() {
        let mut tracker = tracker();
        let today = date("2024-01-01");
        tracker.record(today, EventKind::Start, at("2024-01-01 08:00:00")).unwrap();
        tracker.record(today, EventKind::Stop, at("2024-01-01 12:00:00")).unwrap();
        tracker.record(today, EventKind::Start, at("2024-01-01 13:00:00")).unwrap();
        tracker.record(today, EventKind::Stop, at("2024-01-01 17:00:00")).unwrap();

        let now = at("2024-01-01 20:00:00");
        assert_eq!(tracker.worked(today, now).unwrap(), Duration::hours(8));
        assert_eq!(tracker.paused(today).unwrap(), Some(Duration::hours(1)));
    }

    #[test]
    fn refuses_double_start() {
        let mut tracker = tracker();
        let today = date("2024-01-01");
        tracker.record(today, EventKind::Start, at("2024-01-01 08:00:00")).unwrap();

        let err = tracker
            .record(today, EventKind::Start, at("2024-01-01 09:00:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTransition { .. }));
        assert_eq!(tracker.rows(today).unwrap().len(), 1);
    }

    #[test]
    fn refuses_stop_on_empty_day() {
        let mut tracker = tracker();
        let err = tracker
            .record(date("2024-01-01"), EventKind::Stop, at("2024-01-01 08:00:00"))
            .unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidTransition {
                last: None,
                requested: EventKind::Stop
            }
        ));
    }

    #[test]
    fn collision_against_latest_same_kind() {
        let mut tracker = tracker();
        let today = date("2024-01-01");
        tracker.record(today, EventKind::Start, at("2024-01-01 08:00:00")).unwrap();
        tracker.record(today, EventKind::Stop, at("2024-01-01 10:00:00")).unwrap();
        tracker.record(today, EventKind::Start, at("2024-01-01 17:00:00")).unwrap();
        tracker.record(today, EventKind::Stop, at("2024-01-01 18:00:00")).unwrap();

        let err = tracker
            .record(today, EventKind::Start, at("2024-01-01 16:59:59"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::TimestampCollision { latest, .. } if latest == at("2024-01-01 17:00:00")));

        tracker
            .record(today, EventKind::Start, at("2024-01-01 17:00:01"))
            .unwrap();
    }

    #[test]
    fn validators_are_independent() {
        // A backdated stop passes the transition check but still collides.
        let mut tracker = tracker();
        let today = date("2024-01-01");
        tracker.record(today, EventKind::Start, at("2024-01-01 08:00:00")).unwrap();
        tracker.record(today, EventKind::Stop, at("2024-01-01 12:00:00")).unwrap();
        tracker.record(today, EventKind::Start, at("2024-01-01 13:00:00")).unwrap();

        let err = tracker
            .record(today, EventKind::Stop, at("2024-01-01 11:00:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::TimestampCollision { .. }));
    }

    #[test]
    fn accepted_events_alternate() {
        let mut tracker = tracker();
        let today = date("2024-01-01");
        let attempts = [
            (EventKind::Start, "2024-01-01 08:00:00"),
            (EventKind::Start, "2024-01-01 08:30:00"),
            (EventKind::Stop, "2024-01-01 09:00:00"),
            (EventKind::Stop, "2024-01-01 09:30:00"),
            (EventKind::Start, "2024-01-01 07:59:00"),
            (EventKind::Start, "2024-01-01 10:00:00"),
            (EventKind::Start, "2024-01-01 10:30:00"),
            (EventKind::Stop, "2024-01-01 11:00:00"),
        ];
        let accepted: Vec<_> = attempts
            .into_iter()
            .filter_map(|(kind, time)| tracker.record(today, kind, at(time)).ok())
            .map(|event| event.kind)
            .collect();

        assert_eq!(
            accepted,
            vec![
                EventKind::Start,
                EventKind::Stop,
                EventKind::Start,
                EventKind::Stop
            ]
        );
        assert_eq!(tracker.rows(today).unwrap().len(), 4);
    }

    #[test]
    fn add_raw_bypasses_validation() {
        let mut tracker = tracker();
        tracker.add_raw(EventKind::Stop, at("2024-01-01 08:00:00")).unwrap();
        tracker.add_raw(EventKind::Stop, at("2024-01-01 07:00:00")).unwrap();

        let rows = tracker.rows(date("2024-01-01")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, at("2024-01-01 07:00:00"));
    }

    #[test]
    fn add_raw_files_under_timestamp_date() {
        let mut tracker = tracker();
        let event = tracker.add_raw(EventKind::Start, at("2023-12-31 22:00:00")).unwrap();
        assert_eq!(event.date, date("2023-12-31"));
        assert_eq!(tracker.rows(date("2023-12-31")).unwrap().len(), 1);
    }

    #[test]
    fn delete_reports_missing_rows() {
        let mut tracker = tracker();
        tracker.add_raw(EventKind::Start, at("2024-01-01 08:00:00")).unwrap();
        let id = tracker.rows(date("2024-01-01")).unwrap()[0].id;

        tracker.delete(id).unwrap();
        let err = tracker.delete(id).unwrap_err();
        assert!(matches!(err, TrackerError::RowNotFound(missing) if missing == id));
    }

    #[test]
    fn worked_without_starts_is_no_data() {
        let tracker = tracker();
        let err = tracker
            .worked(date("2024-01-01"), at("2024-01-01 12:00:00"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::NoData { .. }));
    }

    #[test]
    fn week_stops_before_previous_year() {
        let mut tracker = tracker();
        for (kind, time) in [
            (EventKind::Start, "2023-12-31 08:00:00"),
            (EventKind::Stop, "2023-12-31 10:00:00"),
            (EventKind::Start, "2024-01-01 08:00:00"),
            (EventKind::Stop, "2024-01-01 12:00:00"),
            (EventKind::Start, "2024-01-02 09:00:00"),
            (EventKind::Stop, "2024-01-02 10:30:00"),
        ] {
            tracker.add_raw(kind, at(time)).unwrap();
        }

        let week = tracker
            .week(date("2024-01-02"), at("2024-01-02 18:00:00"))
            .unwrap();
        assert_eq!(
            week,
            vec![
                DayTotal {
                    date: date("2024-01-02"),
                    worked: Duration::minutes(90),
                },
                DayTotal {
                    date: date("2024-01-01"),
                    worked: Duration::hours(4),
                },
            ]
        );
    }

    #[test]
    fn week_skips_empty_days() {
        let mut tracker = tracker();
        tracker.add_raw(EventKind::Start, at("2024-01-01 08:00:00")).unwrap();
        tracker.add_raw(EventKind::Stop, at("2024-01-01 09:00:00")).unwrap();

        let week = tracker
            .week(date("2024-01-04"), at("2024-01-04 18:00:00"))
            .unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].date, date("2024-01-01"));
    }
}
