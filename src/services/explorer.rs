//! Opportunity explorer: the full-season usage table.

use serde::Deserialize;

use crate::db::repository::{FullRepository, RepositoryResult};
use crate::db::services::fetch_all_opportunities;
use crate::models::{normalize_opportunities, OpportunityMetric};

/// Optional row filters, matching what the explorer table exposes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerFilter {
    /// Case-insensitive substring on player name.
    pub player: Option<String>,
    /// Exact team code.
    pub team: Option<String>,
    /// Exact position code.
    pub position: Option<String>,
    /// Exact week.
    pub week: Option<i32>,
}

impl ExplorerFilter {
    pub fn is_empty(&self) -> bool {
        self.player.is_none() && self.team.is_none() && self.position.is_none() && self.week.is_none()
    }

    fn matches(&self, row: &OpportunityMetric) -> bool {
        if let Some(ref player) = self.player {
            if !row
                .full_name
                .to_lowercase()
                .contains(&player.to_lowercase())
            {
                return false;
            }
        }
        if let Some(ref team) = self.team {
            if !row.team.eq_ignore_ascii_case(team) {
                return false;
            }
        }
        if let Some(ref position) = self.position {
            if !row.position.eq_ignore_ascii_case(position) {
                return false;
            }
        }
        if let Some(week) = self.week {
            if row.week != week {
                return false;
            }
        }
        true
    }
}

/// Load the explorer dataset: every row of the season, normalized, in the
/// store's season-desc/week-desc order.
pub async fn load_explorer(
    repo: &dyn FullRepository,
    season: i32,
) -> RepositoryResult<Vec<OpportunityMetric>> {
    let rows = fetch_all_opportunities(repo, season).await?;
    Ok(normalize_opportunities(&rows))
}

/// Apply the explorer's optional filters.
pub fn apply_filters(rows: Vec<OpportunityMetric>, filter: &ExplorerFilter) -> Vec<OpportunityMetric> {
    if filter.is_empty() {
        return rows;
    }
    rows.into_iter().filter(|row| filter.matches(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, team: &str, position: &str, week: i32) -> OpportunityMetric {
        OpportunityMetric {
            full_name: name.to_string(),
            team: team.to_string(),
            position: position.to_string(),
            week,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let rows = vec![row("A", "KC", "WR", 1), row("B", "SF", "RB", 2)];
        let filtered = apply_filters(rows.clone(), &ExplorerFilter::default());
        assert_eq!(filtered.len(), rows.len());
    }

    #[test]
    fn test_player_filter_is_substring_case_insensitive() {
        let rows = vec![row("Patrick Mahomes", "KC", "QB", 1), row("Josh Allen", "BUF", "QB", 1)];
        let filter = ExplorerFilter {
            player: Some("mahomes".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(rows, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].full_name, "Patrick Mahomes");
    }

    #[test]
    fn test_combined_filters() {
        let rows = vec![
            row("A", "KC", "WR", 1),
            row("B", "KC", "WR", 2),
            row("C", "KC", "TE", 2),
        ];
        let filter = ExplorerFilter {
            team: Some("kc".to_string()),
            position: Some("WR".to_string()),
            week: Some(2),
            ..Default::default()
        };
        let filtered = apply_filters(rows, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].full_name, "B");
    }
}
