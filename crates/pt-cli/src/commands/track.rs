//! `start` and `stop` commands.
//!
//! Both record an event on today's date at `now - delta`. Refusals are printed
//! as warnings and are not errors.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use pt_core::{EventKind, EventStore, Tracker, TrackerError};

use super::util::{WARN_COLLISION, format_duration, shift_minutes, write_stamped, write_warning};

#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Time delta in minutes to record the event in the past.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub delta: i64,
}

pub fn start<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    args: &TrackArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let at = shift_minutes(now, args.delta)?;
    match tracker.record(now.date(), EventKind::Start, at) {
        Ok(event) => write_stamped(writer, event.time, "Started working")?,
        Err(TrackerError::InvalidTransition { .. }) => {
            write_warning(writer, "Session already running.")?;
        }
        Err(TrackerError::TimestampCollision { .. }) => write_warning(writer, WARN_COLLISION)?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub fn stop<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    args: &TrackArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let today = now.date();
    let at = shift_minutes(now, args.delta)?;
    match tracker.record(today, EventKind::Stop, at) {
        Ok(event) => {
            let worked = tracker.worked(today, now)?;
            write_stamped(
                writer,
                event.time,
                &format!("Worked for {} hours", format_duration(worked)),
            )?;
        }
        Err(TrackerError::InvalidTransition { last: None, .. }) => {
            write_warning(writer, "No session started, yet")?;
        }
        Err(TrackerError::InvalidTransition { .. }) => {
            write_warning(writer, "Session already stopped.")?;
        }
        Err(TrackerError::TimestampCollision { .. }) => write_warning(writer, WARN_COLLISION)?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
