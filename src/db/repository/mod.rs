//! Repository trait definitions: the abstract interface every storage
//! backend implements.
//!
//! The application is a pure reader; every method here is a query. Ordering
//! guarantees are part of the contract because the view layer renders rows
//! in store order.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{RawOpportunityRecord, RawProjectionRecord, RawValue};

/// Sort direction for the week-diff leader queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffDirection {
    /// Largest positive `total_fantasy_points_diff` first (overperformers).
    Over,
    /// Largest negative diff first (underperformers).
    Under,
}

/// Sortable columns of the projection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionOrderBy {
    ProjectedPoints,
    FantasyPoints,
    Season,
    Week,
}

impl FromStr for ProjectionOrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "projected_points" => Ok(Self::ProjectedPoints),
            "fantasy_points" => Ok(Self::FantasyPoints),
            "season" => Ok(Self::Season),
            "week" => Ok(Self::Week),
            other => Err(format!("Unknown projection order column: {}", other)),
        }
    }
}

/// Ordering for projection page queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionOrder {
    pub by: ProjectionOrderBy,
    pub descending: bool,
}

impl Default for ProjectionOrder {
    /// The projections page's first render sorts by projected points,
    /// highest first.
    fn default() -> Self {
        Self {
            by: ProjectionOrderBy::ProjectedPoints,
            descending: true,
        }
    }
}

/// Narrow row returned by the week-diff leader queries (the home-page
/// ticker only reads these five columns).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffLeader {
    pub full_name: Option<String>,
    pub posteam: Option<String>,
    pub position: Option<String>,
    pub week: RawValue,
    pub total_fantasy_points_diff: RawValue,
}

/// Row returned by the player-name search (may repeat a player across
/// weeks; deduplication happens in the service layer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerNameRow {
    pub player_id: String,
    pub full_name: String,
    pub team: String,
    pub position: String,
}

/// Queries against the weekly opportunity table.
#[async_trait]
pub trait OpportunityRepository: Send + Sync {
    /// Latest week with data for the season, or `None` when the season has
    /// no rows yet.
    async fn latest_week(&self, season: i32) -> RepositoryResult<Option<i32>>;

    /// Top `limit` rows of one week ordered by fantasy-points diff in the
    /// given direction.
    async fn fetch_week_diff_leaders(
        &self,
        season: i32,
        week: i32,
        direction: DiffDirection,
        limit: usize,
    ) -> RepositoryResult<Vec<DiffLeader>>;

    /// One page of season rows ordered season desc, week desc. Returning
    /// fewer than `limit` rows signals the end of the data.
    async fn fetch_opportunity_page(
        &self,
        season: i32,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>>;

    /// Full week-ascending history for one player id.
    async fn fetch_player_opportunities(
        &self,
        season: i32,
        player_id: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>>;

    /// Week-ascending history by exact player name.
    async fn fetch_opportunities_by_name(
        &self,
        season: i32,
        full_name: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>>;

    /// Week-ascending history by a case-insensitive `LIKE` pattern
    /// (`%`-wildcards only), used as the fallback when the exact name
    /// lookup comes back empty.
    async fn fetch_opportunities_by_name_fuzzy(
        &self,
        season: i32,
        pattern: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>>;

    /// Case-insensitive substring search on player name, restricted to rows
    /// with a non-null name and id. Capped at `limit` rows by the store.
    async fn search_players(
        &self,
        season: i32,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<PlayerNameRow>>;
}

/// Queries against the weekly projection table.
#[async_trait]
pub trait ProjectionRepository: Send + Sync {
    /// One page of projection rows in the requested order. A short page
    /// signals the end of the data.
    async fn fetch_projection_page(
        &self,
        order: ProjectionOrder,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawProjectionRecord>>;

    /// All projection rows for one player key, ordered season asc, week asc.
    async fn fetch_player_projections(
        &self,
        player_key: &str,
    ) -> RepositoryResult<Vec<RawProjectionRecord>>;
}

/// Combined interface the application is wired against.
#[async_trait]
pub trait FullRepository: OpportunityRepository + ProjectionRepository {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_order_by_from_str() {
        assert_eq!(
            ProjectionOrderBy::from_str("projected_points").unwrap(),
            ProjectionOrderBy::ProjectedPoints
        );
        assert_eq!(
            ProjectionOrderBy::from_str("fantasy_points").unwrap(),
            ProjectionOrderBy::FantasyPoints
        );
        assert!(ProjectionOrderBy::from_str("projectedPoints").is_err());
    }

    #[test]
    fn test_projection_order_default() {
        let order = ProjectionOrder::default();
        assert_eq!(order.by, ProjectionOrderBy::ProjectedPoints);
        assert!(order.descending);
    }
}
