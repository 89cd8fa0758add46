//! Query engine: executes a classified intent as one parameterized
//! aggregate query against the ticket store.
//!
//! Filter values are always bound parameters; the SQL text per shape is
//! static, with `(?n IS NULL OR col = ?n)` guards for optional filters.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::models::intent::{QueryIntent, QueryKind, TimeWindow};
use crate::models::report::{
    AssigneeRow, CountRow, PerformanceRow, QueryReport, SlaRow, SummaryRow, TrendPoint,
};
use crate::models::ticket::{TicketPriority, TicketStatus};
use crate::persistence::db;
use crate::query::classifier;
use crate::{AppError, Result};

/// Executes intents against the ticket store.
///
/// Read-only: one pooled acquisition per call, rows materialized into the
/// report, no caching between calls. Store failures propagate unchanged.
pub struct QueryEngine {
    db: Arc<SqlitePool>,
    default_trend_days: i64,
}

impl QueryEngine {
    /// Create an engine over the given pool, taking defaults from config.
    #[must_use]
    pub fn new(db: Arc<SqlitePool>, config: &GlobalConfig) -> Self {
        Self {
            db,
            default_trend_days: config.query.default_trend_days,
        }
    }

    /// Execute a classified intent and return its typed report.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the store query fails or a stored value
    /// cannot be decoded. Empty result sets are not errors; every shape
    /// yields a well-formed zero-valued payload.
    pub async fn execute(&self, intent: &QueryIntent) -> Result<QueryReport> {
        debug!(kind = intent.kind.as_str(), "executing aggregate query");
        match intent.kind {
            QueryKind::Count => self.count(intent).await,
            QueryKind::Trend => self.trend(intent).await,
            QueryKind::Average => self.average(intent).await,
            QueryKind::Sla => self.sla(intent).await,
            QueryKind::Assignee => self.assignee(intent).await,
            QueryKind::Performance => self.performance(intent).await,
            QueryKind::General => self.general(intent).await,
        }
    }

    /// Classify a question and execute the resulting intent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the store query fails. Classification
    /// itself cannot fail.
    pub async fn answer(&self, question: &str) -> Result<(QueryIntent, QueryReport)> {
        let intent = classifier::classify(question);
        let report = self.execute(&intent).await?;
        Ok((intent, report))
    }

    async fn count(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let rows: Vec<CountQueryRow> = sqlx::query_as(
            "SELECT status, priority, COUNT(*) AS count
             FROM tickets
             WHERE (?1 IS NULL OR status = ?1)
               AND (?2 IS NULL OR priority = ?2)
               AND (?3 IS NULL OR created_at >= ?3)
             GROUP BY status, priority",
        )
        .bind(intent.status.map(TicketStatus::as_str))
        .bind(intent.priority.map(TicketPriority::as_str))
        .bind(window_cutoff(intent.window))
        .fetch_all(self.db.as_ref())
        .await?;

        let breakdown: Vec<CountRow> = rows
            .into_iter()
            .map(CountQueryRow::into_row)
            .collect::<Result<_>>()?;
        let total = breakdown.iter().map(|row| row.count).sum();

        Ok(QueryReport::Count {
            total,
            breakdown,
            filters: intent.clone(),
        })
    }

    async fn trend(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let window = intent
            .window
            .unwrap_or(TimeWindow::new(self.default_trend_days));
        let rows: Vec<TrendQueryRow> = sqlx::query_as(
            "SELECT DATE(created_at) AS date, status, COUNT(*) AS count
             FROM tickets
             WHERE (?1 IS NULL OR created_at >= ?1)
             GROUP BY DATE(created_at), status
             ORDER BY date",
        )
        .bind(window_cutoff(Some(window)))
        .fetch_all(self.db.as_ref())
        .await?;

        let trend_data = rows
            .into_iter()
            .map(TrendQueryRow::into_point)
            .collect::<Result<_>>()?;
        Ok(QueryReport::Trend { trend_data })
    }

    async fn average(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let row: AverageQueryRow = sqlx::query_as(
            "SELECT AVG((julianday(resolved_at) - julianday(created_at)) * 24.0) AS avg_hours,
                    COUNT(*) AS total_resolved
             FROM tickets
             WHERE resolved_at IS NOT NULL
               AND (?1 IS NULL OR created_at >= ?1)",
        )
        .bind(window_cutoff(intent.window))
        .fetch_one(self.db.as_ref())
        .await?;

        Ok(QueryReport::Average {
            avg_resolution_hours: row.avg_hours.unwrap_or(0.0),
            total_resolved: row.total_resolved,
        })
    }

    async fn sla(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let now = db::format_timestamp(Utc::now());
        let rows: Vec<SlaQueryRow> = sqlx::query_as(
            "SELECT priority,
                    COUNT(*) AS total_tickets,
                    SUM(CASE WHEN resolved_at IS NOT NULL AND resolved_at <= sla_deadline
                             THEN 1 ELSE 0 END) AS met_sla,
                    SUM(CASE WHEN resolved_at IS NOT NULL AND resolved_at > sla_deadline
                             THEN 1 ELSE 0 END) AS missed_sla,
                    SUM(CASE WHEN resolved_at IS NULL AND ?1 > sla_deadline
                             THEN 1 ELSE 0 END) AS overdue
             FROM tickets
             WHERE (?2 IS NULL OR created_at >= ?2)
             GROUP BY priority",
        )
        .bind(now)
        .bind(window_cutoff(intent.window))
        .fetch_all(self.db.as_ref())
        .await?;

        let sla_metrics = rows
            .into_iter()
            .map(SlaQueryRow::into_row)
            .collect::<Result<_>>()?;
        Ok(QueryReport::Sla { sla_metrics })
    }

    async fn assignee(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let rows: Vec<AssigneeQueryRow> = sqlx::query_as(
            "SELECT assignee,
                    COUNT(*) AS total_tickets,
                    SUM(CASE WHEN status = 'Open' THEN 1 ELSE 0 END) AS open_tickets,
                    SUM(CASE WHEN status = 'In Progress' THEN 1 ELSE 0 END) AS in_progress,
                    SUM(CASE WHEN status IN ('Resolved', 'Closed') THEN 1 ELSE 0 END) AS resolved
             FROM tickets
             WHERE assignee IS NOT NULL
               AND (?1 IS NULL OR created_at >= ?1)
             GROUP BY assignee
             ORDER BY total_tickets DESC",
        )
        .bind(window_cutoff(intent.window))
        .fetch_all(self.db.as_ref())
        .await?;

        let assignee_stats = rows.into_iter().map(AssigneeQueryRow::into_row).collect();
        Ok(QueryReport::Assignee { assignee_stats })
    }

    async fn performance(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let rows: Vec<PerformanceQueryRow> = sqlx::query_as(
            "SELECT priority, category,
                    COUNT(*) AS total_resolved,
                    AVG((julianday(resolved_at) - julianday(created_at)) * 24.0)
                        AS avg_resolution_hours
             FROM tickets
             WHERE resolved_at IS NOT NULL
               AND (?1 IS NULL OR created_at >= ?1)
             GROUP BY priority, category",
        )
        .bind(window_cutoff(intent.window))
        .fetch_all(self.db.as_ref())
        .await?;

        let performance_metrics = rows
            .into_iter()
            .map(PerformanceQueryRow::into_row)
            .collect::<Result<_>>()?;
        Ok(QueryReport::Performance {
            performance_metrics,
        })
    }

    async fn general(&self, intent: &QueryIntent) -> Result<QueryReport> {
        let rows: Vec<SummaryQueryRow> = sqlx::query_as(
            "SELECT status, priority, category, COUNT(*) AS count
             FROM tickets
             WHERE (?1 IS NULL OR created_at >= ?1)
             GROUP BY status, priority, category",
        )
        .bind(window_cutoff(intent.window))
        .fetch_all(self.db.as_ref())
        .await?;

        let summary = rows
            .into_iter()
            .map(SummaryQueryRow::into_row)
            .collect::<Result<_>>()?;
        Ok(QueryReport::General { summary })
    }
}

/// RFC3339 cutoff for `created_at >= cutoff`, or `None` for no filter.
///
/// A window too large to represent simply selects everything, which is
/// what such a window means.
fn window_cutoff(window: Option<TimeWindow>) -> Option<String> {
    let span = Duration::try_days(window?.days)?;
    let cutoff = Utc::now().checked_sub_signed(span)?;
    Some(db::format_timestamp(cutoff))
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct CountQueryRow {
    status: String,
    priority: String,
    count: i64,
}

impl CountQueryRow {
    fn into_row(self) -> Result<CountRow> {
        Ok(CountRow {
            status: self.status.parse()?,
            priority: self.priority.parse()?,
            count: self.count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TrendQueryRow {
    date: String,
    status: String,
    count: i64,
}

impl TrendQueryRow {
    fn into_point(self) -> Result<TrendPoint> {
        let date: NaiveDate = self
            .date
            .parse()
            .map_err(|e| AppError::Db(format!("invalid trend date: {e}")))?;
        Ok(TrendPoint {
            date,
            status: self.status.parse()?,
            count: self.count,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AverageQueryRow {
    avg_hours: Option<f64>,
    total_resolved: i64,
}

#[derive(sqlx::FromRow)]
struct SlaQueryRow {
    priority: String,
    total_tickets: i64,
    met_sla: i64,
    missed_sla: i64,
    overdue: i64,
}

impl SlaQueryRow {
    fn into_row(self) -> Result<SlaRow> {
        Ok(SlaRow {
            priority: self.priority.parse()?,
            total_tickets: self.total_tickets,
            met_sla: self.met_sla,
            missed_sla: self.missed_sla,
            overdue: self.overdue,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AssigneeQueryRow {
    assignee: String,
    total_tickets: i64,
    open_tickets: i64,
    in_progress: i64,
    resolved: i64,
}

impl AssigneeQueryRow {
    fn into_row(self) -> AssigneeRow {
        AssigneeRow {
            assignee: self.assignee,
            total_tickets: self.total_tickets,
            open_tickets: self.open_tickets,
            in_progress: self.in_progress,
            resolved: self.resolved,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PerformanceQueryRow {
    priority: String,
    category: String,
    total_resolved: i64,
    avg_resolution_hours: Option<f64>,
}

impl PerformanceQueryRow {
    fn into_row(self) -> Result<PerformanceRow> {
        Ok(PerformanceRow {
            priority: self.priority.parse()?,
            category: self.category,
            total_resolved: self.total_resolved,
            avg_resolution_hours: self.avg_resolution_hours.unwrap_or(0.0),
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryQueryRow {
    status: String,
    priority: String,
    category: String,
    count: i64,
}

impl SummaryQueryRow {
    fn into_row(self) -> Result<SummaryRow> {
        Ok(SummaryRow {
            status: self.status.parse()?,
            priority: self.priority.parse()?,
            category: self.category,
            count: self.count,
        })
    }
}
