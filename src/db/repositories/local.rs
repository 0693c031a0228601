//! In-memory local repository implementation.
//!
//! Stores seeded raw records in memory and reimplements the store-side
//! filters, ordering, and paging, giving unit and integration tests fast,
//! deterministic, isolated execution without a database.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::db::repository::{
    DiffDirection, DiffLeader, FullRepository, OpportunityRepository, PlayerNameRow,
    ProjectionOrder, ProjectionOrderBy, ProjectionRepository, RepositoryError, RepositoryResult,
};
use crate::models::{to_integer, to_number, RawOpportunityRecord, RawProjectionRecord};

/// In-memory local repository.
///
/// # Example
/// ```
/// use ffhq_rust::db::repositories::LocalRepository;
/// use ffhq_rust::models::RawOpportunityRecord;
///
/// let repo = LocalRepository::new();
/// repo.seed_opportunities(vec![RawOpportunityRecord::default()]);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    opportunities: Vec<RawOpportunityRecord>,
    projections: Vec<RawProjectionRecord>,
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty, healthy local repository.
    pub fn new() -> Self {
        let repo = Self::default();
        repo.data.write().unwrap().is_healthy = true;
        repo
    }

    /// Seed opportunity rows. Appends to any previously seeded data.
    pub fn seed_opportunities(&self, rows: Vec<RawOpportunityRecord>) {
        self.data.write().unwrap().opportunities.extend(rows);
    }

    /// Seed projection rows. Appends to any previously seeded data.
    pub fn seed_projections(&self, rows: Vec<RawProjectionRecord>) {
        self.data.write().unwrap().projections.extend(rows);
    }

    /// Toggle simulated connectivity for error-path tests. When unhealthy,
    /// every query fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    fn guard(&self) -> RepositoryResult<std::sync::RwLockReadGuard<'_, LocalData>> {
        let data = self
            .data
            .read()
            .map_err(|_| RepositoryError::internal("Local repository lock poisoned"))?;
        if !data.is_healthy {
            return Err(RepositoryError::connection("Local repository marked unhealthy"));
        }
        Ok(data)
    }
}

fn season_matches(row: &RawOpportunityRecord, season: i32) -> bool {
    to_integer(&row.season) == season
}

/// Case-insensitive `LIKE` match supporting only `%` wildcards, mirroring
/// the store's `ilike` semantics for the patterns this application builds.
fn ilike_matches(value: &str, pattern: &str) -> bool {
    let value = value.to_lowercase();
    let pattern = pattern.to_lowercase();
    let segments: Vec<&str> = pattern.split('%').collect();
    if segments.len() == 1 {
        return value == pattern;
    }

    let first = segments[0];
    let last = segments[segments.len() - 1];
    if !value.starts_with(first) {
        return false;
    }

    let mut position = first.len();
    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match value[position..].find(segment) {
            Some(found) => position = position + found + segment.len(),
            None => return false,
        }
    }

    value.len() >= position + last.len() && value[position..].ends_with(last)
}

#[async_trait]
impl OpportunityRepository for LocalRepository {
    async fn latest_week(&self, season: i32) -> RepositoryResult<Option<i32>> {
        let data = self.guard()?;
        Ok(data
            .opportunities
            .iter()
            .filter(|row| season_matches(row, season))
            .map(|row| to_integer(&row.week))
            .max())
    }

    async fn fetch_week_diff_leaders(
        &self,
        season: i32,
        week: i32,
        direction: DiffDirection,
        limit: usize,
    ) -> RepositoryResult<Vec<DiffLeader>> {
        let data = self.guard()?;
        let mut leaders: Vec<DiffLeader> = data
            .opportunities
            .iter()
            .filter(|row| season_matches(row, season) && to_integer(&row.week) == week)
            .map(|row| DiffLeader {
                full_name: row.full_name.clone(),
                posteam: row.posteam.clone(),
                position: row.position.clone(),
                week: row.week.clone(),
                total_fantasy_points_diff: row.total_fantasy_points_diff.clone(),
            })
            .collect();

        leaders.sort_by(|a, b| {
            let left = to_number(&a.total_fantasy_points_diff);
            let right = to_number(&b.total_fantasy_points_diff);
            let ordering = left.partial_cmp(&right).unwrap_or(std::cmp::Ordering::Equal);
            match direction {
                DiffDirection::Over => ordering.reverse(),
                DiffDirection::Under => ordering,
            }
        });
        leaders.truncate(limit);
        Ok(leaders)
    }

    async fn fetch_opportunity_page(
        &self,
        season: i32,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let data = self.guard()?;
        let mut rows: Vec<RawOpportunityRecord> = data
            .opportunities
            .iter()
            .filter(|row| season_matches(row, season))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            to_integer(&b.season)
                .cmp(&to_integer(&a.season))
                .then(to_integer(&b.week).cmp(&to_integer(&a.week)))
        });
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn fetch_player_opportunities(
        &self,
        season: i32,
        player_id: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let data = self.guard()?;
        let mut rows: Vec<RawOpportunityRecord> = data
            .opportunities
            .iter()
            .filter(|row| {
                season_matches(row, season) && row.player_id.as_deref() == Some(player_id)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|row| to_integer(&row.week));
        Ok(rows)
    }

    async fn fetch_opportunities_by_name(
        &self,
        season: i32,
        full_name: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let data = self.guard()?;
        let mut rows: Vec<RawOpportunityRecord> = data
            .opportunities
            .iter()
            .filter(|row| {
                season_matches(row, season) && row.full_name.as_deref() == Some(full_name)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|row| to_integer(&row.week));
        Ok(rows)
    }

    async fn fetch_opportunities_by_name_fuzzy(
        &self,
        season: i32,
        pattern: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let data = self.guard()?;
        let mut rows: Vec<RawOpportunityRecord> = data
            .opportunities
            .iter()
            .filter(|row| {
                season_matches(row, season)
                    && row
                        .full_name
                        .as_deref()
                        .map(|name| ilike_matches(name, pattern))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|row| to_integer(&row.week));
        Ok(rows)
    }

    async fn search_players(
        &self,
        season: i32,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<PlayerNameRow>> {
        let data = self.guard()?;
        let needle = query.to_lowercase();
        Ok(data
            .opportunities
            .iter()
            .filter(|row| season_matches(row, season))
            .filter_map(|row| {
                let full_name = row.full_name.as_deref()?;
                let player_id = row.player_id.as_deref()?;
                if !full_name.to_lowercase().contains(&needle) {
                    return None;
                }
                Some(PlayerNameRow {
                    player_id: player_id.to_string(),
                    full_name: full_name.to_string(),
                    team: row.posteam.clone().unwrap_or_default(),
                    position: row.position.clone().unwrap_or_default(),
                })
            })
            .take(limit)
            .collect())
    }
}

#[async_trait]
impl ProjectionRepository for LocalRepository {
    async fn fetch_projection_page(
        &self,
        order: ProjectionOrder,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawProjectionRecord>> {
        let data = self.guard()?;
        let mut rows: Vec<RawProjectionRecord> = data.projections.clone();

        rows.sort_by(|a, b| {
            let ordering = match order.by {
                ProjectionOrderBy::ProjectedPoints => a
                    .projected_points
                    .unwrap_or(0.0)
                    .partial_cmp(&b.projected_points.unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal),
                ProjectionOrderBy::FantasyPoints => a
                    .fantasy_points
                    .unwrap_or(0.0)
                    .partial_cmp(&b.fantasy_points.unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal),
                ProjectionOrderBy::Season => a.season.unwrap_or(0).cmp(&b.season.unwrap_or(0)),
                ProjectionOrderBy::Week => a.week.unwrap_or(0).cmp(&b.week.unwrap_or(0)),
            };
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn fetch_player_projections(
        &self,
        player_key: &str,
    ) -> RepositoryResult<Vec<RawProjectionRecord>> {
        let data = self.guard()?;
        let mut rows: Vec<RawProjectionRecord> = data
            .projections
            .iter()
            .filter(|row| row.player_key.as_deref() == Some(player_key))
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.season.unwrap_or(0), row.week.unwrap_or(0)));
        Ok(rows)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawValue;

    fn opportunity(season: i32, week: i32, name: &str, id: &str, diff: f64) -> RawOpportunityRecord {
        RawOpportunityRecord {
            season: RawValue::from(season),
            week: RawValue::from(week),
            full_name: Some(name.to_string()),
            player_id: Some(id.to_string()),
            posteam: Some("KC".to_string()),
            position: Some("WR".to_string()),
            total_fantasy_points_diff: RawValue::from(diff),
            ..Default::default()
        }
    }

    #[test]
    fn test_ilike_matches() {
        assert!(ilike_matches("Patrick Mahomes", "%patrick%mahomes%"));
        assert!(ilike_matches("Patrick Mahomes", "%mahomes%"));
        assert!(ilike_matches("Patrick Mahomes", "%PAT%"));
        assert!(!ilike_matches("Patrick Mahomes", "%kelce%"));
        assert!(!ilike_matches("Patrick Mahomes", "%mahomes%patrick%"));
        assert!(ilike_matches("abc", "abc"));
        assert!(!ilike_matches("abc", "ab"));
    }

    #[tokio::test]
    async fn test_latest_week() {
        let repo = LocalRepository::new();
        repo.seed_opportunities(vec![
            opportunity(2025, 1, "A", "1", 0.0),
            opportunity(2025, 4, "B", "2", 0.0),
            opportunity(2024, 9, "C", "3", 0.0),
        ]);
        assert_eq!(repo.latest_week(2025).await.unwrap(), Some(4));
        assert_eq!(repo.latest_week(2023).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_diff_leaders_directions() {
        let repo = LocalRepository::new();
        repo.seed_opportunities(vec![
            opportunity(2025, 1, "Low", "1", -6.0),
            opportunity(2025, 1, "High", "2", 9.0),
            opportunity(2025, 1, "Mid", "3", 2.0),
        ]);

        let over = repo
            .fetch_week_diff_leaders(2025, 1, DiffDirection::Over, 2)
            .await
            .unwrap();
        assert_eq!(over.len(), 2);
        assert_eq!(over[0].full_name.as_deref(), Some("High"));

        let under = repo
            .fetch_week_diff_leaders(2025, 1, DiffDirection::Under, 2)
            .await
            .unwrap();
        assert_eq!(under[0].full_name.as_deref(), Some("Low"));
    }

    #[tokio::test]
    async fn test_page_ordering_and_bounds() {
        let repo = LocalRepository::new();
        repo.seed_opportunities(vec![
            opportunity(2025, 1, "A", "1", 0.0),
            opportunity(2025, 3, "B", "2", 0.0),
            opportunity(2025, 2, "C", "3", 0.0),
        ]);
        let page = repo.fetch_opportunity_page(2025, 0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(to_integer(&page[0].week), 3);
        assert_eq!(to_integer(&page[1].week), 2);

        let rest = repo.fetch_opportunity_page(2025, 2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
    }

    #[tokio::test]
    async fn test_fuzzy_name_lookup() {
        let repo = LocalRepository::new();
        repo.seed_opportunities(vec![opportunity(2025, 1, "Patrick Mahomes", "1", 0.0)]);
        let rows = repo
            .fetch_opportunities_by_name_fuzzy(2025, "%patrick%mahomes%")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_queries() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(repo.latest_week(2025).await.is_err());
        assert_eq!(repo.health_check().await.unwrap(), false);
    }
}
