//! `add` and `delete` commands for manual corrections.
//!
//! Neither consults the state or timestamp validators: `add` only checks the
//! timestamp format and the event kind.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use pt_core::{EventKind, EventStore, Tracker, TrackerError, parse_timestamp};

use super::util::{write_confirmation, write_warning};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Timestamp of the event (YYYY-MM-DD HH:MM:SS).
    pub timestamp: String,
    /// Event kind: start or stop.
    pub event: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Row index as listed by `timestamps`.
    pub rowid: i64,
}

pub fn add<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    args: &AddArgs,
) -> Result<()> {
    let Ok(at) = parse_timestamp(&args.timestamp) else {
        write_warning(writer, "Incorrect timestamp format. Use: YYYY-MM-DD HH:MM:SS")?;
        return Ok(());
    };
    let Ok(kind) = args.event.parse::<EventKind>() else {
        write_warning(writer, "Incorrect event")?;
        return Ok(());
    };

    tracker.add_raw(kind, at)?;
    write_confirmation(writer, "Timestamp successfully added.")?;
    Ok(())
}

pub fn delete<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    args: &DeleteArgs,
) -> Result<()> {
    match tracker.delete(args.rowid) {
        Ok(()) => write_confirmation(writer, "Timestamp successfully removed.")?,
        Err(TrackerError::RowNotFound(_)) => {
            write_warning(writer, "Removal of timestamp not possible.")?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pt_core::parse_date;
    use pt_db::Database;

    fn tracker() -> Tracker<Database> {
        Tracker::new(Database::open_in_memory().unwrap())
    }

    fn run_add(tracker: &mut Tracker<Database>, timestamp: &str, event: &str) -> String {
        let mut output = Vec::new();
        let args = AddArgs {
            timestamp: timestamp.to_string(),
            event: event.to_string(),
        };
        add(&mut output, tracker, &args).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn run_delete(tracker: &mut Tracker<Database>, rowid: i64) -> String {
        let mut output = Vec::new();
        delete(&mut output, tracker, &DeleteArgs { rowid }).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_files_event_under_its_date() {
        let mut tracker = tracker();
        let output = run_add(&mut tracker, "2024-01-01 08:00:00", "start");
        assert_eq!(output, "✔ Timestamp successfully added.\n");

        let rows = tracker.rows(parse_date("2024-01-01").unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, EventKind::Start);
    }

    #[test]
    fn add_skips_state_validation() {
        let mut tracker = tracker();
        run_add(&mut tracker, "2024-01-01 08:00:00", "stop");
        let output = run_add(&mut tracker, "2024-01-01 07:00:00", "stop");
        assert_eq!(output, "✔ Timestamp successfully added.\n");
    }

    #[test]
    fn add_rejects_malformed_timestamp() {
        let mut tracker = tracker();
        let output = run_add(&mut tracker, "2024-01-01T08:00:00", "start");
        assert_eq!(
            output,
            "⚠ Incorrect timestamp format. Use: YYYY-MM-DD HH:MM:SS\n"
        );
    }

    #[test]
    fn add_rejects_unknown_event() {
        let mut tracker = tracker();
        let output = run_add(&mut tracker, "2024-01-01 08:00:00", "pause");
        assert_eq!(output, "⚠ Incorrect event\n");
        assert!(
            tracker
                .rows(parse_date("2024-01-01").unwrap())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn delete_removes_existing_row() {
        let mut tracker = tracker();
        run_add(&mut tracker, "2024-01-01 08:00:00", "start");

        assert_eq!(
            run_delete(&mut tracker, 1),
            "✔ Timestamp successfully removed.\n"
        );
        assert_eq!(
            run_delete(&mut tracker, 1),
            "⚠ Removal of timestamp not possible.\n"
        );
    }
}
