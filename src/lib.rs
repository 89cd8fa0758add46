#![forbid(unsafe_code)]

//! Natural-language analytics over IT support ticket data: a rule-based
//! intent classifier feeding a parameterized `SQLite` aggregate engine.

pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod query;
pub mod render;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
