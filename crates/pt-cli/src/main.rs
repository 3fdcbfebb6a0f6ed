use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use pt_core::Tracker;
use pt_db::Database;
use tracing_subscriber::EnvFilter;

use pt_cli::commands::util::{WARN_NO_DATA, now, write_warning};
use pt_cli::commands::{edit, show, timestamps, track, week};
use pt_cli::{Cli, Commands, Config};

/// Opens the database, creating it and its parent directory if necessary.
fn create_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path).context("failed to open database")
}

/// Opens the database only if the file already exists.
fn existing_database(config: &Config) -> Result<Option<Database>> {
    if !config.database_path.is_file() {
        tracing::debug!(path = %config.database_path.display(), "database does not exist yet");
        return Ok(None);
    }
    Database::open(&config.database_path)
        .context("failed to open database")
        .map(Some)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let now = now();
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Start(args)) => {
            let mut tracker = Tracker::new(create_database(&config)?);
            track::start(&mut out, &mut tracker, args, now)?;
        }
        Some(Commands::Add(args)) => {
            let mut tracker = Tracker::new(create_database(&config)?);
            edit::add(&mut out, &mut tracker, args)?;
        }
        Some(Commands::Stop(args)) => match existing_database(&config)? {
            Some(db) => track::stop(&mut out, &mut Tracker::new(db), args, now)?,
            None => write_warning(&mut out, "No session started, yet")?,
        },
        Some(Commands::Show) => match existing_database(&config)? {
            Some(db) => show::run(&mut out, &Tracker::new(db), now)?,
            None => write_warning(&mut out, WARN_NO_DATA)?,
        },
        Some(Commands::Week(args)) => {
            let goal = config.weekly_goal().context("invalid weekly hours")?;
            match existing_database(&config)? {
                Some(db) => week::run(&mut out, &Tracker::new(db), args, goal, now)?,
                None => write_warning(&mut out, WARN_NO_DATA)?,
            }
        }
        Some(Commands::Timestamps(args)) => match existing_database(&config)? {
            Some(db) => timestamps::run(&mut out, &Tracker::new(db), args, now.date())?,
            None => write_warning(&mut out, WARN_NO_DATA)?,
        },
        Some(Commands::Delete(args)) => match existing_database(&config)? {
            Some(db) => edit::delete(&mut out, &mut Tracker::new(db), args)?,
            None => write_warning(&mut out, WARN_NO_DATA)?,
        },
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
