//! Ticket repository for `SQLite` persistence.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::models::ticket::{NewTicket, Ticket, TicketStatus};
use crate::{AppError, Result};

use super::db;

/// Repository wrapper around `SQLite` for ticket records.
#[derive(Clone)]
pub struct TicketRepo {
    db: Arc<SqlitePool>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    category: String,
    assignee: Option<String>,
    created_at: String,
    updated_at: String,
    resolved_at: Option<String>,
    sla_deadline: String,
    customer_name: Option<String>,
    customer_email: Option<String>,
}

impl TicketRow {
    /// Convert a database row into the domain model.
    fn into_ticket(self) -> Result<Ticket> {
        Ok(Ticket {
            id: self.id,
            title: self.title,
            description: self.description,
            status: self.status.parse()?,
            priority: self.priority.parse()?,
            category: self.category,
            assignee: self.assignee,
            created_at: db::parse_timestamp(&self.created_at)?,
            updated_at: db::parse_timestamp(&self.updated_at)?,
            resolved_at: self
                .resolved_at
                .as_deref()
                .map(db::parse_timestamp)
                .transpose()?,
            sla_deadline: db::parse_timestamp(&self.sla_deadline)?,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
        })
    }
}

const SELECT_COLUMNS: &str = "id, title, description, status, priority, category, assignee, \
     created_at, updated_at, resolved_at, sla_deadline, customer_name, customer_email";

impl TicketRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Insert a new ticket. The store assigns the identifier, creation and
    /// update timestamps, and the SLA deadline; a terminal initial status
    /// also gets `resolved_at` set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn create(&self, new: &NewTicket) -> Result<Ticket> {
        let now = db::now();
        let ticket = Ticket {
            id: 0,
            title: new.title.clone(),
            description: new.description.clone(),
            status: new.status,
            priority: new.priority,
            category: new.category.clone(),
            assignee: new.assignee.clone(),
            created_at: now,
            updated_at: now,
            resolved_at: new.status.is_terminal().then_some(now),
            sla_deadline: new.priority.sla_deadline(now),
            customer_name: new.customer_name.clone(),
            customer_email: new.customer_email.clone(),
        };
        self.insert(ticket).await
    }

    /// Insert a fully-specified record, e.g. backfilled from another
    /// system. The identifier is reassigned by the store; timestamps are
    /// taken as given.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the record violates the resolution
    /// invariants or the insert fails.
    pub async fn import(&self, ticket: &Ticket) -> Result<Ticket> {
        if ticket.resolved_at.is_some() != ticket.status.is_terminal() {
            return Err(AppError::Db(
                "resolved_at must be set exactly when the status is terminal".into(),
            ));
        }
        if let Some(resolved_at) = ticket.resolved_at {
            if resolved_at < ticket.created_at {
                return Err(AppError::Db("resolved_at precedes created_at".into()));
            }
        }
        if ticket.updated_at < ticket.created_at {
            return Err(AppError::Db("updated_at precedes created_at".into()));
        }
        self.insert(ticket.clone()).await
    }

    async fn insert(&self, mut ticket: Ticket) -> Result<Ticket> {
        let result = sqlx::query(
            "INSERT INTO tickets (title, description, status, priority, category, assignee,
                                  created_at, updated_at, resolved_at, sla_deadline,
                                  customer_name, customer_email)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.status.as_str())
        .bind(ticket.priority.as_str())
        .bind(&ticket.category)
        .bind(&ticket.assignee)
        .bind(db::format_timestamp(ticket.created_at))
        .bind(db::format_timestamp(ticket.updated_at))
        .bind(ticket.resolved_at.map(db::format_timestamp))
        .bind(db::format_timestamp(ticket.sla_deadline))
        .bind(&ticket.customer_name)
        .bind(&ticket.customer_email)
        .execute(self.db.as_ref())
        .await?;

        ticket.id = result.last_insert_rowid();
        Ok(ticket)
    }

    /// Retrieve a ticket by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the ticket does not exist.
    pub async fn get_by_id(&self, id: i64) -> Result<Ticket> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM tickets WHERE id = ?1");
        let row: Option<TicketRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;
        row.map_or_else(
            || Err(AppError::NotFound(format!("ticket {id} not found"))),
            TicketRow::into_ticket,
        )
    }

    /// Update a ticket's status, bumping `updated_at`.
    ///
    /// Entering a terminal status sets `resolved_at` if it is not already
    /// set; leaving the terminal pair clears it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the ticket does not exist, or
    /// `AppError::Db` if the update fails.
    pub async fn update_status(&self, id: i64, status: TicketStatus) -> Result<Ticket> {
        let mut current = self.get_by_id(id).await?;
        current.status = status;
        current.updated_at = db::now();
        if status.is_terminal() {
            if current.resolved_at.is_none() {
                current.resolved_at = Some(current.updated_at);
            }
        } else {
            current.resolved_at = None;
        }

        sqlx::query("UPDATE tickets SET status = ?1, updated_at = ?2, resolved_at = ?3 WHERE id = ?4")
            .bind(current.status.as_str())
            .bind(db::format_timestamp(current.updated_at))
            .bind(current.resolved_at.map(db::format_timestamp))
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        Ok(current)
    }

    /// Count all tickets in the store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
            .fetch_one(self.db.as_ref())
            .await?;
        Ok(row.0)
    }
}
