//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::edit::{AddArgs, DeleteArgs};
use crate::commands::timestamps::TimestampsArgs;
use crate::commands::track::TrackArgs;
use crate::commands::week::WeekArgs;

/// Work session tracker.
///
/// Records when you start and stop working and reports daily and weekly totals.
#[derive(Debug, Parser)]
#[command(name = "ptymer", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a work session.
    Start(TrackArgs),

    /// Stop the running work session.
    Stop(TrackArgs),

    /// Show worked and paused time for today.
    Show,

    /// Show worked time for each day of the current week.
    Week(WeekArgs),

    /// List recorded timestamps of a day.
    Timestamps(TimestampsArgs),

    /// Add a timestamp manually.
    Add(AddArgs),

    /// Delete a timestamp by its index.
    Delete(DeleteArgs),
}
