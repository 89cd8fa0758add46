#![forbid(unsafe_code)]

//! `ticketlens` — ask questions about IT support ticket data from the
//! command line.
//!
//! Classifies the question, runs the matching aggregate query against the
//! configured `SQLite` store, and prints the report as text or JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use ticketlens::persistence::{db, ticket_repo::TicketRepo};
use ticketlens::query::engine::QueryEngine;
use ticketlens::render;
use ticketlens::{AppError, GlobalConfig, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "ticketlens", about = "Ask questions about IT support ticket data", version, long_about = None)]
struct Cli {
    /// Natural-language question, e.g. "How many open tickets do we have?".
    question: String,

    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the ticket store path from the config.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Report output format (text or json).
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    if let Some(db_path) = args.db {
        config.db_path = db_path;
    }

    let pool = Arc::new(db::connect(&config.db_path).await?);
    let stored = TicketRepo::new(Arc::clone(&pool)).count().await?;
    info!(db = %config.db_path.display(), tickets = stored, "ticket store connected");

    let engine = QueryEngine::new(pool, &config);
    let (intent, report) = engine.answer(&args.question).await?;
    debug!(kind = intent.kind.as_str(), "question classified");

    let rendered = match args.format {
        OutputFormat::Text => render::format_report(&report),
        OutputFormat::Json => render::to_json_string(&report)?,
    };
    println!("{rendered}");
    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
