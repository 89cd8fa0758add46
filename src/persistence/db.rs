//! `SQLite` connection setup and timestamp conventions.
//!
//! All timestamps are stored as RFC3339 UTC strings at whole-second
//! precision (`YYYY-MM-DDTHH:MM:SSZ`). With one fixed format,
//! lexicographic comparison equals chronological comparison, and
//! `julianday()`/`DATE()` inside aggregate queries parse the values
//! directly.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::{AppError, Result};

use super::schema;

/// Open (creating if absent) the ticket store at `path` and apply schema.
///
/// # Errors
///
/// Returns `AppError::Db` if the parent directory cannot be created, the
/// connection fails, or schema application fails.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| AppError::Db(format!("failed to create db dir: {err}")))?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    schema::bootstrap_schema(&pool).await?;
    Ok(pool)
}

/// Open an in-memory ticket store for tests.
///
/// An in-memory database lives and dies with its connection, so the pool
/// is pinned to a single connection that is never reaped.
///
/// # Errors
///
/// Returns `AppError::Db` if the connection or schema application fails.
pub async fn connect_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new().in_memory(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    schema::bootstrap_schema(&pool).await?;
    Ok(pool)
}

/// Render a timestamp in the store's canonical format.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a timestamp from the store's canonical format.
///
/// # Errors
///
/// Returns `AppError::Db` if the value is not valid RFC3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| AppError::Db(format!("invalid timestamp {raw:?}: {err}")))
}

/// Current time truncated to the store's whole-second precision.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now)
}
