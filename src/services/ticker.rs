//! Home-page swing ticker: the week's biggest fantasy-point surprises.
//!
//! Finds the latest loaded week, pulls the top over- and under-performers
//! by `total_fantasy_points_diff` side by side, and merges them into a
//! single deduplicated strip sorted by swing magnitude.

use serde::Serialize;

use crate::db::repository::{DiffDirection, FullRepository, RepositoryResult};
use crate::models::{player_key_to_slug, to_integer, to_number, RawValue};

/// Rows requested per direction.
pub const TICKER_QUERY_LIMIT: usize = 15;

/// Cap on merged ticker entries.
pub const TICKER_MAX_ITEMS: usize = 25;

/// One ticker entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerItem {
    pub id: String,
    pub player_name: String,
    pub team: String,
    pub position: String,
    /// Realized fantasy points minus expected, for the week.
    pub diff: f64,
    /// Link to the player's opportunity page.
    pub href: String,
    pub week: i32,
}

/// Ticker payload for the home page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerData {
    pub latest_week: Option<i32>,
    pub items: Vec<TickerItem>,
}

/// Build the home-page ticker for a season.
///
/// The two directional queries are independent and issued concurrently;
/// either failing fails the whole ticker. A season with no rows yet yields
/// an empty ticker, which is not an error.
pub async fn build_ticker(
    repo: &dyn FullRepository,
    season: i32,
) -> RepositoryResult<TickerData> {
    let latest_week = match repo.latest_week(season).await? {
        Some(week) => week,
        None => return Ok(TickerData::default()),
    };

    let (overperformers, underperformers) = tokio::join!(
        repo.fetch_week_diff_leaders(season, latest_week, DiffDirection::Over, TICKER_QUERY_LIMIT),
        repo.fetch_week_diff_leaders(season, latest_week, DiffDirection::Under, TICKER_QUERY_LIMIT),
    );
    let overperformers = overperformers?;
    let underperformers = underperformers?;

    let mut seen = std::collections::HashSet::new();
    let mut items: Vec<TickerItem> = overperformers
        .into_iter()
        .chain(underperformers)
        .enumerate()
        .filter_map(|(index, leader)| {
            let diff = to_number(&leader.total_fantasy_points_diff);
            let player_name = leader.full_name.as_deref().unwrap_or("").trim().to_string();

            // Nameless rows and flat weeks carry no signal.
            if player_name.is_empty() || diff == 0.0 {
                return None;
            }

            let team_key = leader.posteam.clone().unwrap_or_else(|| "UNK".to_string());
            if !seen.insert(format!("{}-{}", player_name, team_key)) {
                return None;
            }

            let week = match &leader.week {
                RawValue::Null => latest_week,
                value => to_integer(value),
            };

            Some(TickerItem {
                id: format!("{}-{}-{}-{}", player_name, team_key, week, index),
                href: format!("/ff-opp/{}", player_key_to_slug(&player_name)),
                team: leader.posteam.unwrap_or_default(),
                position: leader.position.unwrap_or_default(),
                player_name,
                diff,
                week,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.diff
            .abs()
            .partial_cmp(&a.diff.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items.truncate(TICKER_MAX_ITEMS);

    Ok(TickerData {
        latest_week: Some(latest_week),
        items,
    })
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod ticker_tests;
