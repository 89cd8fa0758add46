//! Global configuration parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

/// Query-engine tuning knobs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct QueryConfig {
    /// Window applied to trend queries when the question names none.
    #[serde(default = "default_trend_days")]
    pub default_trend_days: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_trend_days: default_trend_days(),
        }
    }
}

fn default_trend_days() -> i64 {
    30
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/tickets.db")
}

/// Global configuration parsed from `config.toml`.
///
/// Every field carries a default, so an absent config file is equivalent
/// to `GlobalConfig::default()`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Path to the `SQLite` ticket store.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Query-engine settings.
    #[serde(default)]
    pub query: QueryConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            query: QueryConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.query.default_trend_days <= 0 {
            return Err(AppError::Config(
                "query.default_trend_days must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
