//! SLA shape: the met/missed/overdue partition, the inclusive deadline
//! comparison, and the resolved-late-is-missed rule.

use ticketlens::models::intent::{QueryIntent, QueryKind};
use ticketlens::models::report::{QueryReport, SlaRow};
use ticketlens::models::ticket::{TicketPriority, TicketStatus};

use super::test_helpers::{engine_and_repo, fixture};

async fn run_sla(engine: &ticketlens::query::engine::QueryEngine) -> Vec<SlaRow> {
    let QueryReport::Sla { sla_metrics } = engine
        .execute(&QueryIntent::of_kind(QueryKind::Sla))
        .await
        .expect("sla query")
    else {
        panic!("expected an sla report");
    };
    sla_metrics
}

#[tokio::test]
async fn each_ticket_lands_in_exactly_one_bucket() {
    let (engine, repo) = engine_and_repo().await;
    // All Critical (4h deadline), created 50h ago: one resolved inside the
    // deadline, one resolved late, one still open and past due.
    let fixtures = [
        fixture(TicketStatus::Resolved, TicketPriority::Critical, "System Crash", 50, Some(2)),
        fixture(TicketStatus::Resolved, TicketPriority::Critical, "System Crash", 50, Some(10)),
        fixture(TicketStatus::Open, TicketPriority::Critical, "System Crash", 50, None),
        // Low (72h deadline), created an hour ago: unresolved but not yet due.
        fixture(TicketStatus::Open, TicketPriority::Low, "Password Reset", 1, None),
    ];
    for ticket in &fixtures {
        repo.import(ticket).await.expect("import fixture");
    }

    let metrics = run_sla(&engine).await;

    let critical = metrics
        .iter()
        .find(|row| row.priority == TicketPriority::Critical)
        .expect("critical row");
    assert_eq!(critical.total_tickets, 3);
    assert_eq!(critical.met_sla, 1);
    assert_eq!(critical.missed_sla, 1);
    assert_eq!(critical.overdue, 1);
    assert!(critical.met_sla + critical.missed_sla <= critical.total_tickets);

    let low = metrics
        .iter()
        .find(|row| row.priority == TicketPriority::Low)
        .expect("low row");
    assert_eq!(low.total_tickets, 1);
    assert_eq!(low.met_sla, 0);
    assert_eq!(low.missed_sla, 0);
    assert_eq!(low.overdue, 0, "not yet due is not overdue");
}

#[tokio::test]
async fn resolution_exactly_at_the_deadline_counts_as_met() {
    let (engine, repo) = engine_and_repo().await;
    let hours = TicketPriority::Critical.sla_hours();
    let on_the_line = fixture(
        TicketStatus::Resolved,
        TicketPriority::Critical,
        "Network Issue",
        10,
        Some(hours),
    );
    repo.import(&on_the_line).await.expect("import fixture");

    let metrics = run_sla(&engine).await;
    let critical = metrics
        .iter()
        .find(|row| row.priority == TicketPriority::Critical)
        .expect("critical row");
    assert_eq!(critical.met_sla, 1);
    assert_eq!(critical.missed_sla, 0);
}

#[tokio::test]
async fn resolved_past_deadline_is_missed_never_overdue() {
    let (engine, repo) = engine_and_repo().await;
    let late = fixture(TicketStatus::Closed, TicketPriority::High, "Hardware Problem", 100, Some(60));
    repo.import(&late).await.expect("import fixture");

    let metrics = run_sla(&engine).await;
    let high = metrics
        .iter()
        .find(|row| row.priority == TicketPriority::High)
        .expect("high row");
    assert_eq!(high.missed_sla, 1);
    assert_eq!(high.overdue, 0);
}

#[tokio::test]
async fn empty_store_yields_no_rows() {
    let (engine, _repo) = engine_and_repo().await;
    assert!(run_sla(&engine).await.is_empty());
}
