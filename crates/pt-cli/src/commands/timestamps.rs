//! `timestamps` command: list the raw events of a day.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use pt_core::event::TIME_FORMAT;
use pt_core::{EventStore, Tracker, parse_date};

use super::util::write_warning;

#[derive(Debug, Args)]
pub struct TimestampsArgs {
    /// Day to list (YYYY-MM-DD). Defaults to today.
    pub date: Option<String>,
}

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &Tracker<S>,
    args: &TimestampsArgs,
    today: NaiveDate,
) -> Result<()> {
    let date = match args.date.as_deref().map(parse_date).transpose() {
        Ok(date) => date.unwrap_or(today),
        Err(_) => {
            write_warning(writer, "Incorrect date format. Use: YYYY-MM-DD")?;
            return Ok(());
        }
    };

    let rows = tracker.rows(date)?;
    if rows.is_empty() {
        write_warning(writer, &format!("No entries for {date}"))?;
        return Ok(());
    }

    writeln!(writer, "{:<6} {:<8} Event", "Index", "Time")?;
    for row in rows {
        writeln!(
            writer,
            "{:<6} {:<8} {}",
            row.id,
            row.time.format(TIME_FORMAT).to_string(),
            row.kind
        )?;
    }
    Ok(())
}
