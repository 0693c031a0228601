use super::*;
use crate::db::repositories::LocalRepository;
use crate::models::RawOpportunityRecord;

fn row(week: i32, name: &str, team: &str, diff: f64) -> RawOpportunityRecord {
    RawOpportunityRecord {
        season: RawValue::from(2025),
        week: RawValue::from(week),
        full_name: Some(name.to_string()),
        posteam: Some(team.to_string()),
        position: Some("WR".to_string()),
        player_id: Some(format!("id-{}", name)),
        total_fantasy_points_diff: RawValue::from(diff),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_empty_store_yields_empty_ticker() {
    let repo = LocalRepository::new();
    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert_eq!(ticker.latest_week, None);
    assert!(ticker.items.is_empty());
}

#[tokio::test]
async fn test_ticker_targets_latest_week_only() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![
        row(1, "Old News", "KC", 20.0),
        row(2, "Fresh Swing", "SF", 5.0),
    ]);
    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert_eq!(ticker.latest_week, Some(2));
    assert_eq!(ticker.items.len(), 1);
    assert_eq!(ticker.items[0].player_name, "Fresh Swing");
    assert_eq!(ticker.items[0].week, 2);
}

#[tokio::test]
async fn test_ticker_sorts_by_swing_magnitude() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![
        row(1, "Small Up", "KC", 2.0),
        row(1, "Big Down", "SF", -9.5),
        row(1, "Medium Up", "DAL", 6.0),
    ]);
    let ticker = build_ticker(&repo, 2025).await.unwrap();
    let names: Vec<&str> = ticker.items.iter().map(|i| i.player_name.as_str()).collect();
    assert_eq!(names, vec!["Big Down", "Medium Up", "Small Up"]);
}

#[tokio::test]
async fn test_ticker_skips_flat_and_nameless_rows() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![
        row(1, "Flat Week", "KC", 0.0),
        RawOpportunityRecord {
            full_name: None,
            ..row(1, "ignored", "SF", 4.0)
        },
        row(1, "Real Swing", "DAL", 3.0),
    ]);
    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert_eq!(ticker.items.len(), 1);
    assert_eq!(ticker.items[0].player_name, "Real Swing");
}

#[tokio::test]
async fn test_ticker_dedupes_across_directions() {
    // With few rows the same player appears in both directional queries;
    // the merge must keep one entry.
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![row(1, "Both Sides", "KC", 7.5)]);
    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert_eq!(ticker.items.len(), 1);
}

#[tokio::test]
async fn test_ticker_caps_merged_items() {
    let repo = LocalRepository::new();
    let rows: Vec<RawOpportunityRecord> = (0..40)
        .map(|i| {
            row(
                1,
                &format!("Player {}", i),
                &format!("T{}", i),
                (i as f64) - 20.0,
            )
        })
        .filter(|r| to_number(&r.total_fantasy_points_diff) != 0.0)
        .collect();
    repo.seed_opportunities(rows);

    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert!(ticker.items.len() <= TICKER_MAX_ITEMS);
    // Two directional queries of 15 can surface at most 30 distinct players.
    assert!(ticker.items.len() <= 2 * TICKER_QUERY_LIMIT);
}

#[tokio::test]
async fn test_ticker_links_to_player_page() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![row(1, "Patrick Mahomes", "KC", 4.0)]);
    let ticker = build_ticker(&repo, 2025).await.unwrap();
    assert_eq!(ticker.items[0].href, "/ff-opp/patrick-mahomes");
}

#[tokio::test]
async fn test_ticker_query_failure_is_fatal() {
    let repo = LocalRepository::new();
    repo.seed_opportunities(vec![row(1, "Someone", "KC", 4.0)]);
    repo.set_healthy(false);
    assert!(build_ticker(&repo, 2025).await.is_err());
}
