//! Weekly projection records: projected versus realized fantasy points.
//!
//! One record per `(player_key, season, week, source)`, where `source`
//! names the external projection provider. Multiple providers may cover the
//! same player-week.

use serde::{Deserialize, Serialize};

/// One projection row as returned by the `player_projection` table.
///
/// The `player.x`/`player.y` columns carry the provider's primary and
/// alternate spellings of the player name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProjectionRecord {
    pub pos: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "player.x")]
    pub player_x: Option<String>,
    #[serde(rename = "player.y")]
    pub player_y: Option<String>,
    pub player_key: Option<String>,
    pub season: Option<i32>,
    pub week: Option<i32>,
    pub team: Option<String>,
    pub projected_points: Option<f64>,
    pub fantasy_points: Option<f64>,
}

/// Normalized projection view model: strings default to empty, numbers to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProjection {
    pub pos: String,
    pub source: String,
    pub player_name: String,
    pub alternate_name: String,
    pub player_key: String,
    pub season: i32,
    pub week: i32,
    pub team: String,
    pub projected_points: f64,
    pub fantasy_points: f64,
}

/// Normalize one raw projection row. Pure and total.
pub fn normalize_projection(row: &RawProjectionRecord) -> PlayerProjection {
    PlayerProjection {
        pos: row.pos.clone().unwrap_or_default(),
        source: row.source.clone().unwrap_or_default(),
        player_name: row.player_x.clone().unwrap_or_default(),
        alternate_name: row.player_y.clone().unwrap_or_default(),
        player_key: row.player_key.clone().unwrap_or_default(),
        season: row.season.unwrap_or(0),
        week: row.week.unwrap_or(0),
        team: row.team.clone().unwrap_or_default(),
        projected_points: row.projected_points.filter(|p| p.is_finite()).unwrap_or(0.0),
        fantasy_points: row.fantasy_points.filter(|p| p.is_finite()).unwrap_or(0.0),
    }
}

/// Batch normalization over projection rows.
pub fn normalize_projections(rows: &[RawProjectionRecord]) -> Vec<PlayerProjection> {
    rows.iter().map(normalize_projection).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_projection_fills_defaults() {
        let projection = normalize_projection(&RawProjectionRecord::default());
        assert_eq!(projection, PlayerProjection::default());
    }

    #[test]
    fn test_normalize_projection_copies_fields() {
        let raw = RawProjectionRecord {
            pos: Some("RB".to_string()),
            source: Some("NumberFire".to_string()),
            player_x: Some("Test Back".to_string()),
            player_y: None,
            player_key: Some("test back".to_string()),
            season: Some(2025),
            week: Some(4),
            team: Some("SF".to_string()),
            projected_points: Some(14.2),
            fantasy_points: Some(19.8),
        };
        let projection = normalize_projection(&raw);
        assert_eq!(projection.pos, "RB");
        assert_eq!(projection.source, "NumberFire");
        assert_eq!(projection.player_name, "Test Back");
        assert_eq!(projection.alternate_name, "");
        assert_eq!(projection.season, 2025);
        assert_eq!(projection.week, 4);
        assert_eq!(projection.projected_points, 14.2);
        assert_eq!(projection.fantasy_points, 19.8);
    }

    #[test]
    fn test_raw_projection_accepts_dotted_columns() {
        let raw: RawProjectionRecord = serde_json::from_str(
            r#"{"player.x": "Primary Name", "player.y": "Alt Name", "player_key": "primary name"}"#,
        )
        .unwrap();
        assert_eq!(raw.player_x.as_deref(), Some("Primary Name"));
        assert_eq!(raw.player_y.as_deref(), Some("Alt Name"));
    }
}
