//! Projection pages: the projections table and per-player projection
//! history.

use serde::Serialize;

use crate::db::repository::{FullRepository, ProjectionOrder, RepositoryResult};
use crate::db::services::fetch_all_projections;
use crate::models::{normalize_projections, title_case, PlayerProjection};

/// Load the projections table dataset in the requested order.
pub async fn load_projections(
    repo: &dyn FullRepository,
    order: ProjectionOrder,
) -> RepositoryResult<Vec<PlayerProjection>> {
    let rows = fetch_all_projections(repo, order).await?;
    Ok(normalize_projections(&rows))
}

/// Everything the projection detail page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionDetail {
    pub display_name: String,
    pub team: String,
    pub pos: String,
    /// Distinct projection providers covering this player, sorted.
    pub sources: Vec<String>,
    /// Distinct seasons on record, sorted.
    pub seasons: Vec<i32>,
    pub rows: Vec<PlayerProjection>,
}

/// Resolve a projection detail page from its player key.
/// Returns `None` when the player has no projection rows.
pub async fn load_projection_detail(
    repo: &dyn FullRepository,
    player_key: &str,
) -> RepositoryResult<Option<ProjectionDetail>> {
    let raw = repo.fetch_player_projections(player_key).await?;
    if raw.is_empty() {
        return Ok(None);
    }

    let rows = normalize_projections(&raw);
    let first = &rows[0];
    let display_name = if !first.player_name.is_empty() {
        first.player_name.clone()
    } else if !first.alternate_name.is_empty() {
        first.alternate_name.clone()
    } else {
        title_case(player_key)
    };

    let mut sources: Vec<String> = rows
        .iter()
        .map(|row| row.source.clone())
        .filter(|source| !source.is_empty())
        .collect();
    sources.sort();
    sources.dedup();

    let mut seasons: Vec<i32> = rows.iter().map(|row| row.season).collect();
    seasons.sort_unstable();
    seasons.dedup();

    Ok(Some(ProjectionDetail {
        display_name,
        team: first.team.clone(),
        pos: first.pos.clone(),
        sources,
        seasons,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::ProjectionOrderBy;
    use crate::models::RawProjectionRecord;

    fn projection(key: &str, source: &str, season: i32, week: i32, points: f64) -> RawProjectionRecord {
        RawProjectionRecord {
            pos: Some("WR".to_string()),
            source: Some(source.to_string()),
            player_x: Some(title_case(key)),
            player_y: None,
            player_key: Some(key.to_string()),
            season: Some(season),
            week: Some(week),
            team: Some("KC".to_string()),
            projected_points: Some(points),
            fantasy_points: Some(points + 1.0),
        }
    }

    #[tokio::test]
    async fn test_load_projections_default_order() {
        let repo = LocalRepository::new();
        repo.seed_projections(vec![
            projection("a player", "espn", 2025, 1, 10.0),
            projection("b player", "espn", 2025, 1, 22.0),
        ]);
        let rows = load_projections(&repo, ProjectionOrder::default()).await.unwrap();
        assert_eq!(rows[0].player_key, "b player");
        assert_eq!(rows[0].projected_points, 22.0);
    }

    #[tokio::test]
    async fn test_load_projections_custom_order() {
        let repo = LocalRepository::new();
        repo.seed_projections(vec![
            projection("a player", "espn", 2025, 3, 10.0),
            projection("b player", "espn", 2025, 1, 22.0),
        ]);
        let order = ProjectionOrder {
            by: ProjectionOrderBy::Week,
            descending: false,
        };
        let rows = load_projections(&repo, order).await.unwrap();
        assert_eq!(rows[0].week, 1);
    }

    #[tokio::test]
    async fn test_detail_collects_sources_and_seasons() {
        let repo = LocalRepository::new();
        repo.seed_projections(vec![
            projection("test player", "numberfire", 2024, 17, 9.0),
            projection("test player", "espn", 2025, 1, 11.0),
            projection("test player", "espn", 2025, 2, 12.0),
            projection("someone else", "espn", 2025, 1, 5.0),
        ]);

        let detail = load_projection_detail(&repo, "test player")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.display_name, "Test Player");
        assert_eq!(detail.sources, vec!["espn", "numberfire"]);
        assert_eq!(detail.seasons, vec![2024, 2025]);
        assert_eq!(detail.rows.len(), 3);
        // Ordered season asc, week asc.
        assert_eq!(detail.rows[0].season, 2024);
        assert_eq!(detail.rows[2].week, 2);
    }

    #[tokio::test]
    async fn test_detail_unknown_player_is_none() {
        let repo = LocalRepository::new();
        assert!(load_projection_detail(&repo, "nobody").await.unwrap().is_none());
    }
}
