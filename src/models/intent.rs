//! Structured representation of what a natural-language question asks for.

use serde::{Deserialize, Serialize};

use crate::models::ticket::{TicketPriority, TicketStatus};

/// Aggregation shape a question maps to.
///
/// Closed set; the engine matches on it exhaustively. An unrecognized tag
/// in serialized form deserializes to [`QueryKind::General`] rather than
/// failing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Ticket counts grouped by status and priority.
    Count,
    /// Daily created-ticket counts over a window.
    Trend,
    /// Mean resolution time across resolved tickets.
    Average,
    /// SLA met/missed/overdue partition per priority.
    Sla,
    /// Per-assignee workload.
    Assignee,
    /// Resolution performance per priority and category.
    Performance,
    /// Fallback summary when no keyword group matches.
    General,
}

impl QueryKind {
    /// Snake-case tag, matching the serialized `query_type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Trend => "trend",
            Self::Average => "average",
            Self::Sla => "sla",
            Self::Assignee => "assignee",
            Self::Performance => "performance",
            Self::General => "general",
        }
    }

    /// Map a tag back to its kind. Anything outside the recognized set is
    /// the general shape, never an error.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "count" => Self::Count,
            "trend" => Self::Trend,
            "average" => Self::Average,
            "sla" => Self::Sla,
            "assignee" => Self::Assignee,
            "performance" => Self::Performance,
            _ => Self::General,
        }
    }
}

impl<'de> Deserialize<'de> for QueryKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Relative filter selecting tickets created within the last `days` days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Window length in days, counted back from now.
    pub days: i64,
}

impl TimeWindow {
    /// Window of the given number of days.
    #[must_use]
    pub const fn new(days: i64) -> Self {
        Self { days }
    }
}

/// Classified form of a question: aggregation shape plus optional filters.
///
/// Produced per question and consumed by the engine; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryIntent {
    /// Aggregation shape.
    #[serde(rename = "type")]
    pub kind: QueryKind,
    /// Status filter, when the question names one.
    #[serde(default)]
    pub status: Option<TicketStatus>,
    /// Priority filter, when the question names one.
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    /// Time window, when the question names one.
    #[serde(default, rename = "time_filter")]
    pub window: Option<TimeWindow>,
}

impl QueryIntent {
    /// Bare intent of the given kind with no filters.
    #[must_use]
    pub const fn of_kind(kind: QueryKind) -> Self {
        Self {
            kind,
            status: None,
            priority: None,
            window: None,
        }
    }
}
