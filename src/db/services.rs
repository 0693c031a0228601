//! High-level data access functions used by pages and API routes.
//!
//! These sit between the HTTP/service layer and the repository trait: they
//! own the pagination loop the list pages rely on, the exact-then-fuzzy
//! player lookup, and the search deduplication rules. Everything here works
//! against `&dyn FullRepository`, so any backend slots in.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::repository::{FullRepository, ProjectionOrder, RepositoryResult};
use crate::models::{
    normalize_opportunities, title_case, OpportunityMetric, RawOpportunityRecord,
    RawProjectionRecord,
};

/// Fixed page size for the list-page fetch loops. A page shorter than this
/// is the end-of-data signal.
pub const PAGE_SIZE: usize = 1000;

/// Queries shorter than this never reach the store.
pub const SEARCH_MIN_QUERY_LEN: usize = 2;

/// Store-side cap on name-search rows.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// One deduplicated name-search hit, in the shape the search endpoint
/// returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSearchResult {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
    pub position: String,
}

/// Fetch every opportunity row for a season, page by page.
///
/// Loops until the store returns a short (or empty) page. Any query error
/// aborts the whole fetch with no partial results and no retry; every
/// caller is a read-only page load that is safely re-run by reloading.
pub async fn fetch_all_opportunities(
    repo: &dyn FullRepository,
    season: i32,
) -> RepositoryResult<Vec<RawOpportunityRecord>> {
    let mut rows = Vec::new();
    let mut offset = 0;

    loop {
        let page = repo.fetch_opportunity_page(season, offset, PAGE_SIZE).await?;
        if page.is_empty() {
            break;
        }

        let page_len = page.len();
        rows.extend(page);

        if page_len < PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }

    log::debug!("fetched {} opportunity rows for season {}", rows.len(), season);
    Ok(rows)
}

/// Fetch every projection row in the requested order, page by page.
/// Same termination and failure contract as [`fetch_all_opportunities`].
pub async fn fetch_all_projections(
    repo: &dyn FullRepository,
    order: ProjectionOrder,
) -> RepositoryResult<Vec<RawProjectionRecord>> {
    let mut rows = Vec::new();
    let mut offset = 0;

    loop {
        let page = repo.fetch_projection_page(order, offset, PAGE_SIZE).await?;
        if page.is_empty() {
            break;
        }

        let page_len = page.len();
        rows.extend(page);

        if page_len < PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }

    log::debug!("fetched {} projection rows", rows.len());
    Ok(rows)
}

/// Normalized, week-ordered opportunity history for one player id.
/// An unknown id yields an empty vector, not an error.
pub async fn get_player_opportunities(
    repo: &dyn FullRepository,
    season: i32,
    player_id: &str,
) -> RepositoryResult<Vec<OpportunityMetric>> {
    let rows = repo.fetch_player_opportunities(season, player_id).await?;
    Ok(normalize_opportunities(&rows))
}

/// Resolve a player detail page's history from its URL key.
///
/// First looks up the title-cased key as an exact name; when that comes
/// back empty, retries with a whitespace-tolerant wildcard pattern. Both
/// empty means the player genuinely has no rows this season (a "not found"
/// page, not a failure).
pub async fn find_player_history(
    repo: &dyn FullRepository,
    season: i32,
    player_key: &str,
) -> RepositoryResult<Vec<OpportunityMetric>> {
    let candidate_name = title_case(player_key);
    let rows = repo
        .fetch_opportunities_by_name(season, &candidate_name)
        .await?;

    if !rows.is_empty() {
        return Ok(normalize_opportunities(&rows));
    }

    let pattern = format!(
        "%{}%",
        player_key.split_whitespace().collect::<Vec<_>>().join("%")
    );
    let fallback = repo
        .fetch_opportunities_by_name_fuzzy(season, &pattern)
        .await?;
    Ok(normalize_opportunities(&fallback))
}

/// Case-insensitive player-name search.
///
/// Queries shorter than [`SEARCH_MIN_QUERY_LEN`] short-circuit to an empty
/// result without touching the store. Store rows repeat one player per
/// week, so results are deduplicated by player id (first occurrence wins,
/// preserving store order).
pub async fn search_players(
    repo: &dyn FullRepository,
    season: i32,
    query: &str,
) -> RepositoryResult<Vec<PlayerSearchResult>> {
    if query.len() < SEARCH_MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    let rows = repo
        .search_players(season, query, SEARCH_RESULT_LIMIT)
        .await?;

    let mut seen: HashSet<String> = HashSet::new();
    Ok(rows
        .into_iter()
        .filter(|row| seen.insert(row.player_id.clone()))
        .map(|row| PlayerSearchResult {
            player_id: row.player_id,
            player_name: row.full_name,
            team: row.team,
            position: row.position,
        })
        .collect())
}

/// Check that the backing store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
