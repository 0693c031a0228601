//! Integration tests exercising the service layer end-to-end against the
//! local repository: normalize, derive, aggregate.

use ffhq_rust::db::repositories::LocalRepository;
use ffhq_rust::db::services;
use ffhq_rust::metrics::{evaluate, find_metric, summarize};
use ffhq_rust::models::{normalize_opportunity, RawOpportunityRecord, RawValue};
use ffhq_rust::services::{build_ticker, load_explorer, ComparisonSession};

fn week_row(name: &str, id: &str, week: i32, receptions: &str, targets: &str) -> RawOpportunityRecord {
    RawOpportunityRecord {
        season: RawValue::from(2025),
        week: RawValue::from(week),
        full_name: Some(name.to_string()),
        player_id: Some(id.to_string()),
        posteam: Some("KC".to_string()),
        position: Some("WR".to_string()),
        receptions: RawValue::from(receptions),
        rec_attempt: RawValue::from(targets),
        receptions_exp: RawValue::Null,
        ..Default::default()
    }
}

#[test]
fn test_normalize_then_reception_rate_end_to_end() {
    // The store hands back a string count, a null expectation, and a string
    // attempt total; the derived rate must still come out clean.
    let raw = RawOpportunityRecord {
        receptions: RawValue::from("5"),
        receptions_exp: RawValue::Null,
        rec_attempt: RawValue::from("8"),
        ..Default::default()
    };
    let another = raw.clone();

    for row in [raw, another] {
        let normalized = normalize_opportunity(&row);
        let metric = find_metric("receptionRate").unwrap();
        let sample = evaluate(metric, &normalized);
        assert_eq!(sample.actual, 0.625);
        assert_eq!(sample.expected, 0.0);
    }
}

#[tokio::test]
async fn test_player_history_through_repository_and_engine() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![
        week_row("Test Receiver", "00-1", 2, "3", "6"),
        week_row("Test Receiver", "00-1", 1, "4", "8"),
    ]);

    let history = services::get_player_opportunities(&repo, 2025, "00-1")
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    // Store orders by week ascending regardless of seed order.
    assert_eq!(history[0].week, 1);
    assert_eq!(history[1].week, 2);

    let rate = find_metric("receptionRate").unwrap();
    let summary = summarize(rate, &history);
    // Mean of 0.5 and 0.5.
    assert_eq!(summary.actual_total, 0.5);

    let receptions = find_metric("receptions").unwrap();
    let totals = summarize(receptions, &history);
    assert_eq!(totals.actual_total, 7.0);
}

#[tokio::test]
async fn test_comparison_session_over_fetched_histories() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![
        week_row("Primary Player", "00-1", 1, "4", "8"),
        week_row("Primary Player", "00-1", 2, "6", "8"),
        week_row("Rival Player", "00-2", 2, "2", "4"),
    ]);

    let primary = services::get_player_opportunities(&repo, 2025, "00-1")
        .await
        .unwrap();
    let rival = services::get_player_opportunities(&repo, 2025, "00-2")
        .await
        .unwrap();

    let mut session =
        ComparisonSession::with_primary("00-1", "Primary Player", "KC", "WR", primary);
    assert!(session.add_player("00-2", "Rival Player", "KC", "WR", rival));
    assert!(session.toggle_metric("receptionRate"));

    let rows = session.chart_rows("receptionRate");
    assert_eq!(rows.len(), 2);
    // Week 1 exists only for the primary player.
    assert!(rows[0].samples[0].is_some());
    assert!(rows[0].samples[1].is_none());

    let summaries = session.summaries("receptionRate");
    assert_eq!(summaries[0].summary.actual_total, 0.625); // mean of 0.5, 0.75
    assert_eq!(summaries[1].summary.actual_total, 0.5);
}

#[tokio::test]
async fn test_explorer_and_ticker_share_one_seeded_store() {
    let repo = LocalRepository::new();
    let mut rows = vec![
        week_row("Alpha", "00-1", 1, "4", "8"),
        week_row("Beta", "00-2", 1, "2", "4"),
    ];
    rows[0].total_fantasy_points_diff = RawValue::from(6.5);
    rows[1].total_fantasy_points_diff = RawValue::from("-3.25");
    repo.seed_opportunities(rows);

    let explorer = load_explorer(&repo, 2025).await.unwrap();
    assert_eq!(explorer.len(), 2);
    assert!(explorer.iter().all(|row| row.season == 2025));

    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert_eq!(ticker.latest_week, Some(1));
    assert_eq!(ticker.items.len(), 2);
    assert_eq!(ticker.items[0].player_name, "Alpha");
    assert_eq!(ticker.items[1].diff, -3.25);
}

#[tokio::test]
async fn test_search_flow_caps_and_dedupes() {
    let repo = LocalRepository::new();
    // 30 weeks of the same player: one search hit after dedup.
    repo.seed_opportunities(
        (1..=30)
            .map(|week| week_row("Smith Example", "00-1", week, "1", "2"))
            .collect(),
    );

    let hits = services::search_players(&repo, 2025, "Smith").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].player_name, "Smith Example");

    let short = services::search_players(&repo, 2025, "S").await.unwrap();
    assert!(short.is_empty());
}
