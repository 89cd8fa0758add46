//! Ticket model invariants: SLA offsets, canonical string forms, and
//! lifecycle helpers.

use chrono::{Duration, Utc};
use ticketlens::models::ticket::{NewTicket, TicketPriority, TicketStatus};

#[test]
fn sla_hours_per_priority_band() {
    assert_eq!(TicketPriority::Critical.sla_hours(), 4);
    assert_eq!(TicketPriority::High.sla_hours(), 24);
    assert_eq!(TicketPriority::Medium.sla_hours(), 48);
    assert_eq!(TicketPriority::Low.sla_hours(), 72);
}

#[test]
fn sla_deadline_is_created_at_plus_band_offset() {
    let created_at = Utc::now();
    let deadline = TicketPriority::Critical.sla_deadline(created_at);
    assert_eq!(deadline - created_at, Duration::hours(4));
}

#[test]
fn status_round_trips_through_canonical_strings() {
    let all = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
        TicketStatus::Pending,
    ];
    for status in all {
        let parsed: TicketStatus = status.as_str().parse().expect("canonical form parses");
        assert_eq!(parsed, status);
    }
}

#[test]
fn priority_round_trips_through_canonical_strings() {
    let all = [
        TicketPriority::Low,
        TicketPriority::Medium,
        TicketPriority::High,
        TicketPriority::Critical,
    ];
    for priority in all {
        let parsed: TicketPriority = priority.as_str().parse().expect("canonical form parses");
        assert_eq!(parsed, priority);
    }
}

#[test]
fn unknown_status_string_is_rejected() {
    assert!("Reopened".parse::<TicketStatus>().is_err());
    assert!("urgent".parse::<TicketPriority>().is_err());
}

#[test]
fn only_resolved_and_closed_are_terminal() {
    assert!(TicketStatus::Resolved.is_terminal());
    assert!(TicketStatus::Closed.is_terminal());
    assert!(!TicketStatus::Open.is_terminal());
    assert!(!TicketStatus::InProgress.is_terminal());
    assert!(!TicketStatus::Pending.is_terminal());
}

#[test]
fn in_progress_serializes_with_its_canonical_name() {
    let json = serde_json::to_string(&TicketStatus::InProgress).expect("serialize");
    assert_eq!(json, "\"In Progress\"");
    let back: TicketStatus = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, TicketStatus::InProgress);
}

#[test]
fn new_ticket_defaults_to_open_and_unassigned() {
    let new = NewTicket::open("VPN down", TicketPriority::High, "VPN Issue");
    assert_eq!(new.status, TicketStatus::Open);
    assert_eq!(new.assignee, None);
    assert_eq!(new.category, "VPN Issue");
}

#[test]
fn new_ticket_builders_set_fields() {
    let new = NewTicket::open("Printer jam", TicketPriority::Low, "Printer Problem")
        .with_assignee("Sarah Ali")
        .with_status(TicketStatus::InProgress);
    assert_eq!(new.assignee.as_deref(), Some("Sarah Ali"));
    assert_eq!(new.status, TicketStatus::InProgress);
}
