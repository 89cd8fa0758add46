//! Ticket model and lifecycle helpers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Workflow status of a support ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TicketStatus {
    /// Newly filed, not yet picked up.
    Open,
    /// Being worked by an assignee.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Fixed and confirmed with the customer.
    Resolved,
    /// Closed out, terminal.
    Closed,
    /// Waiting on the customer or a third party.
    Pending,
}

impl TicketStatus {
    /// Canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Pending => "Pending",
        }
    }

    /// Whether the status ends the ticket lifecycle.
    ///
    /// `resolved_at` is present on a ticket iff its status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl Display for TicketStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "In Progress" => Ok(Self::InProgress),
            "Resolved" => Ok(Self::Resolved),
            "Closed" => Ok(Self::Closed),
            "Pending" => Ok(Self::Pending),
            other => Err(AppError::Db(format!("invalid ticket status: {other}"))),
        }
    }
}

/// Priority band of a support ticket. Determines the SLA deadline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TicketPriority {
    /// Routine request.
    Low,
    /// Standard issue.
    Medium,
    /// Degraded service.
    High,
    /// Outage or security incident.
    Critical,
}

impl TicketPriority {
    /// Canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Hours allowed between creation and resolution for this band.
    #[must_use]
    pub const fn sla_hours(self) -> i64 {
        match self {
            Self::Critical => 4,
            Self::High => 24,
            Self::Medium => 48,
            Self::Low => 72,
        }
    }

    /// SLA deadline for a ticket created at `created_at`.
    #[must_use]
    pub fn sla_deadline(self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::hours(self.sla_hours())
    }
}

impl Display for TicketPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Critical" => Ok(Self::Critical),
            other => Err(AppError::Db(format!("invalid ticket priority: {other}"))),
        }
    }
}

/// Support ticket persisted in the `tickets` table.
///
/// Invariants maintained by the repository:
/// `resolved_at` is `Some` iff `status.is_terminal()`;
/// `sla_deadline` is always `created_at + sla_hours(priority)`;
/// `created_at <= updated_at`, and `created_at <= resolved_at` when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    /// Store-assigned row identifier.
    pub id: i64,
    /// Short summary.
    pub title: String,
    /// Free-text detail.
    pub description: Option<String>,
    /// Current workflow status.
    pub status: TicketStatus,
    /// Priority band.
    pub priority: TicketPriority,
    /// Classification tag, e.g. "Network Issue".
    pub category: String,
    /// Assigned team member; `None` means unassigned.
    pub assignee: Option<String>,
    /// Creation timestamp; immutable.
    pub created_at: DateTime<Utc>,
    /// Bumped whenever a mutable field changes.
    pub updated_at: DateTime<Utc>,
    /// Set when the ticket enters a terminal status.
    pub resolved_at: Option<DateTime<Utc>>,
    /// `created_at + sla_hours(priority)`; immutable.
    pub sla_deadline: DateTime<Utc>,
    /// Reporting customer, informational only.
    pub customer_name: Option<String>,
    /// Reporting customer's email, informational only.
    pub customer_email: Option<String>,
}

/// Creation payload for a new ticket. The store assigns the identifier,
/// timestamps, and SLA deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    /// Short summary.
    pub title: String,
    /// Free-text detail.
    pub description: Option<String>,
    /// Initial workflow status.
    pub status: TicketStatus,
    /// Priority band.
    pub priority: TicketPriority,
    /// Classification tag.
    pub category: String,
    /// Assigned team member, if any.
    pub assignee: Option<String>,
    /// Reporting customer.
    pub customer_name: Option<String>,
    /// Reporting customer's email.
    pub customer_email: Option<String>,
}

impl NewTicket {
    /// Minimal open ticket with the given title, priority, and category.
    #[must_use]
    pub fn open(
        title: impl Into<String>,
        priority: TicketPriority,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TicketStatus::Open,
            priority,
            category: category.into(),
            assignee: None,
            customer_name: None,
            customer_email: None,
        }
    }

    /// Set the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the initial status.
    #[must_use]
    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }
}
