//! Per-player opportunity detail page.

use serde::Serialize;

use crate::db::repository::{FullRepository, RepositoryResult};
use crate::db::services::find_player_history;
use crate::metrics::default_metric_ids;
use crate::models::{title_case, OpportunityMetric};

/// Everything the player detail page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPage {
    pub display_name: String,
    pub team: String,
    pub position: String,
    pub total_weeks: usize,
    /// Position-appropriate starting metric selection.
    pub default_metrics: Vec<String>,
    pub rows: Vec<OpportunityMetric>,
}

/// Resolve a player page from its URL key.
///
/// Returns `None` when both the exact and the fuzzy name lookup come back
/// empty. That is the "not found" page, distinct from a query failure.
pub async fn load_player_page(
    repo: &dyn FullRepository,
    season: i32,
    player_key: &str,
) -> RepositoryResult<Option<PlayerPage>> {
    let rows = find_player_history(repo, season, player_key).await?;
    if rows.is_empty() {
        return Ok(None);
    }

    let first = &rows[0];
    let display_name = if first.full_name.is_empty() {
        title_case(player_key)
    } else {
        first.full_name.clone()
    };

    Ok(Some(PlayerPage {
        display_name,
        team: first.team.clone(),
        position: first.position.clone(),
        total_weeks: rows.len(),
        default_metrics: default_metric_ids(&first.position)
            .iter()
            .map(|id| id.to_string())
            .collect(),
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::{RawOpportunityRecord, RawValue};

    fn seed(repo: &LocalRepository, name: &str, position: &str, weeks: &[i32]) {
        repo.seed_opportunities(
            weeks
                .iter()
                .map(|week| RawOpportunityRecord {
                    season: RawValue::from(2025),
                    week: RawValue::from(*week),
                    full_name: Some(name.to_string()),
                    posteam: Some("KC".to_string()),
                    position: Some(position.to_string()),
                    player_id: Some("00-1".to_string()),
                    ..Default::default()
                })
                .collect(),
        );
    }

    #[tokio::test]
    async fn test_player_page_resolves_by_slug_key() {
        let repo = LocalRepository::new();
        seed(&repo, "Travis Kelce", "TE", &[1, 2, 3]);

        let page = load_player_page(&repo, 2025, "travis kelce")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.display_name, "Travis Kelce");
        assert_eq!(page.team, "KC");
        assert_eq!(page.position, "TE");
        assert_eq!(page.total_weeks, 3);
        assert!(page.default_metrics.contains(&"targetShare".to_string()));
        assert_eq!(page.rows[0].week, 1);
    }

    #[tokio::test]
    async fn test_player_page_defaults_follow_position() {
        let repo = LocalRepository::new();
        seed(&repo, "Josh Jacobs", "RB", &[1]);
        let page = load_player_page(&repo, 2025, "josh jacobs")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            page.default_metrics,
            vec!["rushShare", "yardsPerRush", "rushingFantasyPoints", "totalFantasyPoints"]
        );
    }

    #[tokio::test]
    async fn test_unknown_player_is_none() {
        let repo = LocalRepository::new();
        let page = load_player_page(&repo, 2025, "ghost player").await.unwrap();
        assert!(page.is_none());
    }
}
