//! Full pipeline: question text through the classifier into the engine.

use ticketlens::models::intent::{QueryKind, TimeWindow};
use ticketlens::models::report::QueryReport;
use ticketlens::models::ticket::{TicketPriority, TicketStatus};

use super::test_helpers::{engine_and_repo, fixture};

#[tokio::test]
async fn how_many_open_tickets_counts_only_open() {
    let (engine, repo) = engine_and_repo().await;
    let fixtures = [
        fixture(TicketStatus::Open, TicketPriority::High, "Network Issue", 5, None),
        fixture(TicketStatus::Open, TicketPriority::Low, "VPN Issue", 6, None),
        fixture(TicketStatus::Resolved, TicketPriority::High, "Email Issue", 48, Some(3)),
    ];
    for ticket in &fixtures {
        repo.import(ticket).await.expect("import fixture");
    }

    let (intent, report) = engine
        .answer("How many open tickets do we have?")
        .await
        .expect("answer");

    assert_eq!(intent.kind, QueryKind::Count);
    assert_eq!(intent.status, Some(TicketStatus::Open));
    let QueryReport::Count { total, .. } = report else {
        panic!("expected a count report");
    };
    assert_eq!(total, 2);
}

#[tokio::test]
async fn sla_compliance_question_reaches_the_sla_shape() {
    let (engine, repo) = engine_and_repo().await;
    let resolved = fixture(TicketStatus::Resolved, TicketPriority::Critical, "System Crash", 50, Some(2));
    repo.import(&resolved).await.expect("import fixture");

    let (intent, report) = engine
        .answer("What's our SLA compliance rate?")
        .await
        .expect("answer");

    assert_eq!(intent.kind, QueryKind::Sla);
    let QueryReport::Sla { sla_metrics } = report else {
        panic!("expected an sla report");
    };
    assert_eq!(sla_metrics.len(), 1);
    assert_eq!(sla_metrics[0].met_sla, 1);
}

#[tokio::test]
async fn week_window_flows_from_question_to_filter() {
    let (engine, repo) = engine_and_repo().await;
    let recent = fixture(TicketStatus::Open, TicketPriority::Low, "Email Issue", 24, None);
    let old = fixture(TicketStatus::Open, TicketPriority::Low, "Email Issue", 10 * 24, None);
    repo.import(&recent).await.expect("import fixture");
    repo.import(&old).await.expect("import fixture");

    let (intent, report) = engine
        .answer("How many tickets were created this week?")
        .await
        .expect("answer");

    assert_eq!(intent.window, Some(TimeWindow::new(7)));
    let QueryReport::Count { total, .. } = report else {
        panic!("expected a count report");
    };
    assert_eq!(total, 1);
}

#[tokio::test]
async fn unmatched_question_falls_back_to_the_general_summary() {
    let (engine, repo) = engine_and_repo().await;
    let ticket = fixture(TicketStatus::Pending, TicketPriority::Medium, "Printer Problem", 12, None);
    repo.import(&ticket).await.expect("import fixture");

    let (intent, report) = engine
        .answer("Give me a picture of the queue")
        .await
        .expect("answer");

    assert_eq!(intent.kind, QueryKind::General);
    let QueryReport::General { summary } = report else {
        panic!("expected a general report");
    };
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].count, 1);
}
