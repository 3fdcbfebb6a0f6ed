//! Shared utilities for CLI commands.

use std::io::{self, Write};

use anyhow::Context;
use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use pt_core::event::TIME_FORMAT;

pub const WARN_SYMBOL: &str = "⚠";
pub const CONFIRM_SYMBOL: &str = "✔";

pub const WARN_COLLISION: &str = "Timestamp collision with existing one";
pub const WARN_NO_DATA: &str = "No data to show";

/// Current local wall-clock time at second precision.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Moves `now` back by `delta_minutes`. Negative deltas move it forward.
pub fn shift_minutes(now: NaiveDateTime, delta_minutes: i64) -> anyhow::Result<NaiveDateTime> {
    let delta = Duration::try_minutes(delta_minutes)
        .with_context(|| format!("delta out of range: {delta_minutes} minutes"))?;
    now.checked_sub_signed(delta)
        .with_context(|| format!("delta out of range: {delta_minutes} minutes"))
}

/// Formats a duration as `H:MM:SS`.
///
/// Hours are not wrapped at 24. Negative durations get a leading `-`.
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{sign}{hours}:{minutes:02}:{seconds:02}")
}

/// Writes `[HH:MM:SS]: text`.
pub fn write_stamped<W: Write>(writer: &mut W, at: NaiveDateTime, text: &str) -> io::Result<()> {
    writeln!(writer, "[{}]: {text}", at.format(TIME_FORMAT))
}

pub fn write_warning<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writeln!(writer, "{WARN_SYMBOL} {text}")
}

pub fn write_confirmation<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writeln!(writer, "{CONFIRM_SYMBOL} {text}")
}
