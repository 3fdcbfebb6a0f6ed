//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use chrono::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Target working hours per weekday (e.g. `monday = 8.0`).
    #[serde(default)]
    pub hours: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("ptymer.db"),
            hours: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PTYMER_*)
        figment = figment.merge(Env::prefixed("PTYMER_"));

        figment.extract()
    }

    /// Sum of all configured weekday hours, or `None` when no target is set.
    ///
    /// Fails when the sum is not finite or does not fit a [`Duration`].
    #[expect(
        clippy::cast_possible_truncation,
        reason = "out-of-range values saturate and are rejected by try_seconds"
    )]
    pub fn weekly_goal(&self) -> Result<Option<Duration>> {
        if self.hours.is_empty() {
            return Ok(None);
        }
        let hours: f64 = self.hours.values().sum();
        if !hours.is_finite() {
            bail!("weekly hours must be a finite number, got {hours}");
        }
        let goal = Duration::try_seconds((hours * 3600.0).round() as i64)
            .ok_or_else(|| anyhow!("weekly hours out of range: {hours}"))?;
        Ok(Some(goal))
    }
}

/// Returns the platform-specific config directory for ptymer.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ptymer"))
}

/// Returns the platform-specific data directory for ptymer.
///
/// On Linux: `~/.local/share/ptymer`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ptymer"))
}
