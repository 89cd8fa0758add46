//! Typed query results, one payload shape per aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::intent::{QueryIntent, QueryKind};
use crate::models::ticket::{TicketPriority, TicketStatus};

/// One status/priority bucket of a count query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountRow {
    /// Bucket status.
    pub status: TicketStatus,
    /// Bucket priority.
    pub priority: TicketPriority,
    /// Tickets in the bucket.
    pub count: i64,
}

/// Tickets created on one day with one status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    /// Creation date.
    pub date: NaiveDate,
    /// Status bucket.
    pub status: TicketStatus,
    /// Tickets created that day with that status.
    pub count: i64,
}

/// SLA outcome partition for one priority band.
///
/// Every ticket in the band contributes to exactly one of `met_sla`,
/// `missed_sla`, `overdue`, or the unresolved-not-yet-due remainder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlaRow {
    /// Priority band.
    pub priority: TicketPriority,
    /// All tickets in the band.
    pub total_tickets: i64,
    /// Resolved on or before the deadline.
    pub met_sla: i64,
    /// Resolved after the deadline.
    pub missed_sla: i64,
    /// Still unresolved with the deadline already past.
    pub overdue: i64,
}

/// Workload summary for one assignee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssigneeRow {
    /// Team member name.
    pub assignee: String,
    /// All tickets assigned to them.
    pub total_tickets: i64,
    /// Currently open.
    pub open_tickets: i64,
    /// Currently in progress.
    pub in_progress: i64,
    /// Resolved or closed.
    pub resolved: i64,
}

/// Resolution performance for one priority/category pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceRow {
    /// Priority band.
    pub priority: TicketPriority,
    /// Ticket category.
    pub category: String,
    /// Resolved tickets in the pair.
    pub total_resolved: i64,
    /// Mean hours from creation to resolution.
    pub avg_resolution_hours: f64,
}

/// One status/priority/category bucket of the general summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    /// Bucket status.
    pub status: TicketStatus,
    /// Bucket priority.
    pub priority: TicketPriority,
    /// Bucket category.
    pub category: String,
    /// Tickets in the bucket.
    pub count: i64,
}

/// Result of executing a [`QueryIntent`], tagged by the aggregation shape
/// that produced it.
///
/// Serializes to the textual exchange format consumed by downstream
/// formatters; the tag field is `query_type`. Round-trips losslessly
/// through JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "query_type", rename_all = "snake_case")]
pub enum QueryReport {
    /// Count aggregation payload.
    Count {
        /// Sum of all bucket counts.
        total: i64,
        /// Per status/priority buckets.
        breakdown: Vec<CountRow>,
        /// Echo of the intent the counts were filtered by.
        filters: QueryIntent,
    },
    /// Trend aggregation payload.
    Trend {
        /// Daily counts in ascending date order.
        trend_data: Vec<TrendPoint>,
    },
    /// Average-resolution aggregation payload.
    Average {
        /// Mean hours from creation to resolution; 0.0 when nothing matched.
        avg_resolution_hours: f64,
        /// Resolved tickets the mean covers.
        total_resolved: i64,
    },
    /// SLA aggregation payload.
    Sla {
        /// Partition per priority band.
        sla_metrics: Vec<SlaRow>,
    },
    /// Assignee aggregation payload.
    Assignee {
        /// Workloads in descending total order.
        assignee_stats: Vec<AssigneeRow>,
    },
    /// Performance aggregation payload.
    Performance {
        /// Metrics per priority/category pair.
        performance_metrics: Vec<PerformanceRow>,
    },
    /// General summary payload.
    General {
        /// Counts per status/priority/category bucket.
        summary: Vec<SummaryRow>,
    },
}

impl QueryReport {
    /// The aggregation shape that produced this report.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        match self {
            Self::Count { .. } => QueryKind::Count,
            Self::Trend { .. } => QueryKind::Trend,
            Self::Average { .. } => QueryKind::Average,
            Self::Sla { .. } => QueryKind::Sla,
            Self::Assignee { .. } => QueryKind::Assignee,
            Self::Performance { .. } => QueryKind::Performance,
            Self::General { .. } => QueryKind::General,
        }
    }
}
