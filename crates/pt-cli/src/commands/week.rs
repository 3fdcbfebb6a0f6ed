//! `week` command: worked time per day of the current ISO week.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDateTime};
use clap::Args;
use pt_core::{DayTotal, EventStore, Tracker, week_total};
use serde::Serialize;

use super::util::{WARN_NO_DATA, format_duration, write_warning};

#[derive(Debug, Args)]
pub struct WeekArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Week report, oldest day first.
#[derive(Debug, Serialize)]
pub struct WeekReport {
    pub days: Vec<DayTotal>,
    pub overall_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<i64>,
}

impl WeekReport {
    pub fn new(mut days: Vec<DayTotal>, goal: Option<Duration>) -> Result<Self> {
        days.reverse();
        let overall = week_total(&days);
        let remaining = goal
            .map(|goal| {
                goal.checked_sub(&overall)
                    .ok_or_else(|| anyhow!("remaining weekly time out of range"))
            })
            .transpose()?;
        Ok(Self {
            days,
            overall_seconds: overall.num_seconds(),
            remaining_seconds: remaining.map(|remaining| remaining.num_seconds()),
        })
    }
}

pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    tracker: &Tracker<S>,
    args: &WeekArgs,
    goal: Option<Duration>,
    now: NaiveDateTime,
) -> Result<()> {
    let days = tracker.week(now.date(), now)?;
    if days.is_empty() {
        write_warning(writer, WARN_NO_DATA)?;
        return Ok(());
    }

    let report = WeekReport::new(days, goal)?;
    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_report(&report))?;
    }
    Ok(())
}

/// Formats the human-readable week table.
pub fn format_report(report: &WeekReport) -> String {
    let mut output = String::new();
    writeln!(output, "{:<10} {:>9}", "Day", "Worktime").unwrap();
    for day in &report.days {
        writeln!(
            output,
            "{:<10} {:>9}",
            day.date.format("%A").to_string(),
            format_duration(day.worked)
        )
        .unwrap();
    }
    writeln!(output, "{}", "─".repeat(20)).unwrap();
    writeln!(
        output,
        "{:<10} {:>9}",
        "Overall",
        format_duration(Duration::seconds(report.overall_seconds))
    )
    .unwrap();
    if let Some(remaining) = report.remaining_seconds {
        writeln!(
            output,
            "{:<10} {:>9}",
            "Remaining",
            format_duration(Duration::seconds(remaining))
        )
        .unwrap();
    }
    output
}
