//! `show` command: today's worked and paused time.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use pt_core::{EventStore, Tracker, TrackerError};

use super::util::{format_duration, write_stamped, write_warning};

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &Tracker<S>,
    now: NaiveDateTime,
) -> Result<()> {
    let today = now.date();
    if tracker.last_event_kind(today)?.is_none() {
        write_warning(writer, "No session existing for today, yet")?;
        return Ok(());
    }

    let day = tracker.day(today)?;
    match day.worked(now) {
        Ok(worked) => write_stamped(
            writer,
            now,
            &format!("Worked for {} hours", format_duration(worked)),
        )?,
        // Only stops were added for today.
        Err(TrackerError::NoData { .. }) => {
            write_warning(writer, "Couldn't calculate duration for today")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    if let Some(paused) = day.paused() {
        write_stamped(
            writer,
            now,
            &format!("Paused for {} hours", format_duration(paused)),
        )?;
    }
    Ok(())
}
