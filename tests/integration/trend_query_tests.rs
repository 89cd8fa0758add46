//! Trend shape: daily buckets, ascending order, and the configured
//! default window when the question names none.

use std::sync::Arc;

use ticketlens::models::intent::{QueryIntent, QueryKind, TimeWindow};
use ticketlens::models::report::QueryReport;
use ticketlens::models::ticket::{TicketPriority, TicketStatus};
use ticketlens::persistence::{db, ticket_repo::TicketRepo};
use ticketlens::query::engine::QueryEngine;
use ticketlens::GlobalConfig;

use super::test_helpers::{engine_and_repo, fixture, hours_ago};

#[tokio::test]
async fn buckets_by_day_and_status_in_ascending_order() {
    let (engine, repo) = engine_and_repo().await;
    let fixtures = [
        fixture(TicketStatus::Open, TicketPriority::High, "Network Issue", 48, None),
        fixture(TicketStatus::Open, TicketPriority::Low, "VPN Issue", 48, None),
        fixture(TicketStatus::Resolved, TicketPriority::High, "Email Issue", 24, Some(2)),
    ];
    for ticket in &fixtures {
        repo.import(ticket).await.expect("import fixture");
    }

    let QueryReport::Trend { trend_data } = engine
        .execute(&QueryIntent::of_kind(QueryKind::Trend))
        .await
        .expect("trend query")
    else {
        panic!("expected a trend report");
    };

    let dates: Vec<_> = trend_data.iter().map(|point| point.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted, "trend points are date-ascending");

    let two_days_ago = hours_ago(48).date_naive();
    let open_bucket = trend_data
        .iter()
        .find(|point| point.date == two_days_ago && point.status == TicketStatus::Open)
        .expect("open bucket two days ago");
    assert_eq!(open_bucket.count, 2);
}

#[tokio::test]
async fn default_window_excludes_old_tickets() {
    let (engine, repo) = engine_and_repo().await;
    let old = fixture(TicketStatus::Open, TicketPriority::Low, "Printer Problem", 40 * 24, None);
    let recent = fixture(TicketStatus::Open, TicketPriority::Low, "Printer Problem", 24, None);
    repo.import(&old).await.expect("import fixture");
    repo.import(&recent).await.expect("import fixture");

    let QueryReport::Trend { trend_data } = engine
        .execute(&QueryIntent::of_kind(QueryKind::Trend))
        .await
        .expect("trend query")
    else {
        panic!("expected a trend report");
    };
    assert_eq!(trend_data.iter().map(|point| point.count).sum::<i64>(), 1);
}

#[tokio::test]
async fn explicit_window_overrides_the_default() {
    let (engine, repo) = engine_and_repo().await;
    let old = fixture(TicketStatus::Open, TicketPriority::Low, "Printer Problem", 40 * 24, None);
    repo.import(&old).await.expect("import fixture");

    let intent = QueryIntent {
        kind: QueryKind::Trend,
        status: None,
        priority: None,
        window: Some(TimeWindow::new(60)),
    };
    let QueryReport::Trend { trend_data } =
        engine.execute(&intent).await.expect("trend query")
    else {
        panic!("expected a trend report");
    };
    assert_eq!(trend_data.iter().map(|point| point.count).sum::<i64>(), 1);
}

#[tokio::test]
async fn default_window_comes_from_config() {
    let pool = Arc::new(db::connect_memory().await.expect("in-memory connect"));
    let mut config = GlobalConfig::default();
    config.query.default_trend_days = 5;
    let engine = QueryEngine::new(Arc::clone(&pool), &config);
    let repo = TicketRepo::new(pool);

    let ticket = fixture(TicketStatus::Open, TicketPriority::Low, "Email Issue", 10 * 24, None);
    repo.import(&ticket).await.expect("import fixture");

    let QueryReport::Trend { trend_data } = engine
        .execute(&QueryIntent::of_kind(QueryKind::Trend))
        .await
        .expect("trend query")
    else {
        panic!("expected a trend report");
    };
    assert!(trend_data.is_empty(), "ticket older than the configured window");
}
