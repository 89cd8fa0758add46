//! `SQLite` schema bootstrap logic.
//!
//! The table definition uses `CREATE TABLE IF NOT EXISTS` — safe to
//! re-run on every startup. Produces a convergent result.

use sqlx::SqlitePool;

use crate::Result;

/// Apply the ticket table definition to the connected `SQLite` database.
///
/// Idempotent; safe to call on every startup.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS tickets (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    description     TEXT,
    status          TEXT NOT NULL CHECK(status IN ('Open','In Progress','Resolved','Closed','Pending')),
    priority        TEXT NOT NULL CHECK(priority IN ('Low','Medium','High','Critical')),
    category        TEXT NOT NULL,
    assignee        TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    resolved_at     TEXT,
    sla_deadline    TEXT NOT NULL,
    customer_name   TEXT,
    customer_email  TEXT
);

CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
CREATE INDEX IF NOT EXISTS idx_tickets_priority ON tickets(priority);
CREATE INDEX IF NOT EXISTS idx_tickets_assignee ON tickets(assignee);
CREATE INDEX IF NOT EXISTS idx_tickets_created ON tickets(created_at);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
