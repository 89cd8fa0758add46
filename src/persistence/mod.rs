//! Persistence layer modules.

pub mod db;
pub mod schema;
pub mod ticket_repo;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;
