//! Rule-based intent classifier for ticket questions.
//!
//! Keyword decision lists evaluated top-to-bottom; the first matching rule
//! wins. Rule order is load-bearing: a question containing both "how many"
//! and "sla" classifies as a count because the count group is checked
//! first. Never reorder.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::intent::{QueryIntent, QueryKind, TimeWindow};
use crate::models::ticket::{TicketPriority, TicketStatus};

/// Ordered keyword groups for aggregation-shape detection.
const KIND_RULES: &[(&[&str], QueryKind)] = &[
    (&["how many", "count", "number of"], QueryKind::Count),
    (&["trend", "over time"], QueryKind::Trend),
    (&["average", "mean", "resolution time"], QueryKind::Average),
    (&["sla", "deadline", "overdue", "compliance"], QueryKind::Sla),
    (&["who", "assignee", "workload", "team member"], QueryKind::Assignee),
    (
        &["performance", "resolve", "resolution", "slowest", "longest"],
        QueryKind::Performance,
    ),
];

/// Ordered substring rules for the status filter. "progress" also covers
/// "in progress".
const STATUS_RULES: &[(&str, TicketStatus)] = &[
    ("open", TicketStatus::Open),
    ("progress", TicketStatus::InProgress),
    ("resolved", TicketStatus::Resolved),
    ("closed", TicketStatus::Closed),
    ("pending", TicketStatus::Pending),
];

/// Ordered substring rules for the priority filter. Substring semantics
/// are intentional, e.g. "slowest" matches "low".
const PRIORITY_RULES: &[(&str, TicketPriority)] = &[
    ("critical", TicketPriority::Critical),
    ("high", TicketPriority::High),
    ("medium", TicketPriority::Medium),
    ("low", TicketPriority::Low),
];

/// Ordered named time windows, checked before the numeric pattern.
const NAMED_WINDOWS: &[(&str, i64)] = &[
    ("today", 1),
    ("week", 7),
    ("month", 30),
    ("year", 365),
];

#[allow(clippy::expect_used)] // the pattern is a literal; compilation cannot fail
static NUMERIC_WINDOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(day|week|month)").expect("numeric window pattern"));

/// Classify a natural-language question into a structured intent.
///
/// Total function: unmatched text yields [`QueryKind::General`] with all
/// filters absent. Case-insensitive; kind, status, priority, and window
/// detection are independent passes over the same lowercased text.
#[must_use]
pub fn classify(question: &str) -> QueryIntent {
    let q = question.trim().to_lowercase();
    QueryIntent {
        kind: detect_kind(&q),
        status: detect_status(&q),
        priority: detect_priority(&q),
        window: detect_window(&q),
    }
}

fn detect_kind(q: &str) -> QueryKind {
    for (keywords, kind) in KIND_RULES {
        if keywords.iter().any(|word| q.contains(word)) {
            return *kind;
        }
    }
    QueryKind::General
}

fn detect_status(q: &str) -> Option<TicketStatus> {
    STATUS_RULES
        .iter()
        .find(|(word, _)| q.contains(word))
        .map(|(_, status)| *status)
}

fn detect_priority(q: &str) -> Option<TicketPriority> {
    PRIORITY_RULES
        .iter()
        .find(|(word, _)| q.contains(word))
        .map(|(_, priority)| *priority)
}

fn detect_window(q: &str) -> Option<TimeWindow> {
    for (word, days) in NAMED_WINDOWS {
        if q.contains(word) {
            return Some(TimeWindow::new(*days));
        }
    }

    // Bare "N days" phrasings; the named words above already caught any
    // question containing "week", "month", or "year".
    let caps = NUMERIC_WINDOW.captures(q)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;
    let per_unit = match caps.get(2)?.as_str() {
        "week" => 7,
        "month" => 30,
        _ => 1,
    };
    amount.checked_mul(per_unit).map(TimeWindow::new)
}
