//! Weekly opportunity records: raw store rows and the normalized view model.
//!
//! One record covers one player-week of usage in the
//! `nflreadr_nfl_ff_opportunity` table, identified by
//! `(season, week, player_id)`. The pipeline is the only writer; this
//! application treats every row as immutable.

use serde::{Deserialize, Serialize};

use super::coerce::{to_integer, to_number, to_text, RawValue};

/// One player-week of usage data exactly as the store returns it.
///
/// Every stat cell may arrive as text, a number, or null; identity columns
/// may be null. Missing keys deserialize to null via the field defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOpportunityRecord {
    pub season: RawValue,
    pub week: RawValue,
    pub full_name: Option<String>,
    pub posteam: Option<String>,
    pub position: Option<String>,
    pub player_id: Option<String>,
    pub receptions: RawValue,
    pub rec_attempt: RawValue,
    pub rush_attempt: RawValue,
    pub pass_attempt: RawValue,
    pub pass_completions: RawValue,
    pub pass_completions_exp: RawValue,
    pub rec_yards_gained: RawValue,
    pub rec_air_yards: RawValue,
    pub pass_air_yards: RawValue,
    pub total_touchdown: RawValue,
    pub total_yards_gained: RawValue,
    pub total_fantasy_points: RawValue,
    pub total_first_down: RawValue,
    pub rec_touchdown: RawValue,
    pub rec_first_down: RawValue,
    pub rec_fantasy_points: RawValue,
    pub rec_interception: RawValue,
    pub rec_interception_exp: RawValue,
    pub rec_fumble_lost: RawValue,
    pub rec_two_point_conv: RawValue,
    pub rec_two_point_conv_exp: RawValue,
    pub rush_touchdown: RawValue,
    pub rush_yards_gained: RawValue,
    pub rush_first_down: RawValue,
    pub rush_fantasy_points: RawValue,
    pub rush_fumble_lost: RawValue,
    pub rush_two_point_conv: RawValue,
    pub rush_two_point_conv_exp: RawValue,
    pub pass_yards_gained: RawValue,
    pub pass_yards_gained_exp: RawValue,
    pub pass_touchdown: RawValue,
    pub pass_touchdown_exp: RawValue,
    pub pass_first_down: RawValue,
    pub pass_first_down_exp: RawValue,
    pub pass_fantasy_points: RawValue,
    pub pass_fantasy_points_exp: RawValue,
    pub pass_interception: RawValue,
    pub pass_interception_exp: RawValue,
    pub pass_two_point_conv: RawValue,
    pub pass_two_point_conv_exp: RawValue,
    pub receptions_exp: RawValue,
    pub rec_yards_gained_exp: RawValue,
    pub rec_touchdown_exp: RawValue,
    pub rec_first_down_exp: RawValue,
    pub rec_fantasy_points_exp: RawValue,
    pub rush_yards_gained_exp: RawValue,
    pub rush_touchdown_exp: RawValue,
    pub rush_first_down_exp: RawValue,
    pub rush_fantasy_points_exp: RawValue,
    pub total_yards_gained_exp: RawValue,
    pub total_touchdown_exp: RawValue,
    pub total_first_down_exp: RawValue,
    pub total_fantasy_points_exp: RawValue,
    /// Pipeline-materialized `total_fantasy_points - total_fantasy_points_exp`;
    /// the home-page ticker sorts on this column server-side.
    pub total_fantasy_points_diff: RawValue,
    // Team context columns used to compute usage shares
    pub rec_attempt_team: RawValue,
    pub rush_attempt_team: RawValue,
    pub pass_attempt_team: RawValue,
    pub rec_air_yards_team: RawValue,
    pub pass_air_yards_team: RawValue,
    pub receptions_team: RawValue,
    pub rec_yards_gained_team: RawValue,
    pub rec_touchdown_team: RawValue,
    pub rec_fantasy_points_team: RawValue,
    pub rush_yards_gained_team: RawValue,
    pub rush_touchdown_team: RawValue,
    pub rush_fantasy_points_team: RawValue,
    pub pass_yards_gained_team: RawValue,
    pub pass_touchdown_team: RawValue,
    pub pass_fantasy_points_team: RawValue,
    pub pass_completions_team: RawValue,
    pub total_yards_gained_team: RawValue,
    pub total_touchdown_team: RawValue,
    pub total_fantasy_points_team: RawValue,
}

/// Normalized player-week view model.
///
/// Invariants: every numeric field is finite (absent or malformed input
/// normalizes to 0) and every string field is a trimmed, possibly empty,
/// string, never null. JSON serialization uses the camelCase names the
/// dashboard's chart and table clients consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityMetric {
    pub season: i32,
    pub week: i32,
    pub player_id: String,
    pub full_name: String,
    pub team: String,
    pub position: String,
    // Receiving
    pub receptions: f64,
    pub receptions_expected: f64,
    pub targets: f64,
    pub receiving_yards: f64,
    pub receiving_yards_expected: f64,
    pub air_yards: f64,
    pub receiving_td: f64,
    pub receiving_td_expected: f64,
    pub receiving_first_downs: f64,
    pub receiving_first_downs_expected: f64,
    pub receiving_fantasy_points: f64,
    pub receiving_fantasy_points_expected: f64,
    pub receiving_interceptions: f64,
    pub receiving_interceptions_expected: f64,
    pub receiving_fumbles: f64,
    pub receiving_two_point_conv: f64,
    pub receiving_two_point_conv_expected: f64,
    // Rushing
    pub rushing_attempts: f64,
    pub rushing_yards: f64,
    pub rushing_yards_expected: f64,
    pub rushing_td: f64,
    pub rushing_td_expected: f64,
    pub rushing_first_downs: f64,
    pub rushing_first_downs_expected: f64,
    pub rushing_fantasy_points: f64,
    pub rushing_fantasy_points_expected: f64,
    pub rushing_fumbles: f64,
    pub rushing_two_point_conv: f64,
    pub rushing_two_point_conv_expected: f64,
    // Passing
    pub passing_attempts: f64,
    pub passing_completions: f64,
    pub passing_completions_expected: f64,
    pub passing_yards: f64,
    pub passing_yards_expected: f64,
    pub passing_air_yards: f64,
    pub passing_td: f64,
    pub passing_td_expected: f64,
    pub passing_first_downs: f64,
    pub passing_first_downs_expected: f64,
    pub passing_fantasy_points: f64,
    pub passing_fantasy_points_expected: f64,
    pub passing_interceptions: f64,
    pub passing_interceptions_expected: f64,
    pub passing_two_point_conv: f64,
    pub passing_two_point_conv_expected: f64,
    // Totals
    pub total_yards: f64,
    pub total_yards_expected: f64,
    pub total_td: f64,
    pub total_td_expected: f64,
    pub total_first_downs: f64,
    pub total_first_downs_expected: f64,
    pub total_fantasy_points: f64,
    pub total_fantasy_points_expected: f64,
    // Team context for share calculations
    pub team_targets: f64,
    pub team_rush_attempts: f64,
    pub team_pass_attempts: f64,
    pub team_receiving_air_yards: f64,
    pub team_passing_air_yards: f64,
    pub team_receptions: f64,
    pub team_receiving_yards: f64,
    pub team_receiving_tds: f64,
    pub team_receiving_fantasy_points: f64,
    pub team_rushing_yards: f64,
    pub team_rushing_tds: f64,
    pub team_rushing_fantasy_points: f64,
    pub team_passing_yards: f64,
    pub team_passing_tds: f64,
    pub team_passing_fantasy_points: f64,
    pub team_passing_completions: f64,
    pub team_total_yards: f64,
    pub team_total_tds: f64,
    pub team_total_fantasy_points: f64,
}

/// Normalize one raw store row into the typed view model.
///
/// Pure and total: applies the coercion rules from [`super::coerce`] field
/// by field and never fails.
pub fn normalize_opportunity(row: &RawOpportunityRecord) -> OpportunityMetric {
    OpportunityMetric {
        season: to_integer(&row.season),
        week: to_integer(&row.week),
        player_id: to_text(&row.player_id),
        full_name: to_text(&row.full_name),
        team: to_text(&row.posteam),
        position: to_text(&row.position),
        receptions: to_number(&row.receptions),
        receptions_expected: to_number(&row.receptions_exp),
        targets: to_number(&row.rec_attempt),
        receiving_yards: to_number(&row.rec_yards_gained),
        receiving_yards_expected: to_number(&row.rec_yards_gained_exp),
        air_yards: to_number(&row.rec_air_yards),
        receiving_td: to_number(&row.rec_touchdown),
        receiving_td_expected: to_number(&row.rec_touchdown_exp),
        receiving_first_downs: to_number(&row.rec_first_down),
        receiving_first_downs_expected: to_number(&row.rec_first_down_exp),
        receiving_fantasy_points: to_number(&row.rec_fantasy_points),
        receiving_fantasy_points_expected: to_number(&row.rec_fantasy_points_exp),
        receiving_interceptions: to_number(&row.rec_interception),
        receiving_interceptions_expected: to_number(&row.rec_interception_exp),
        receiving_fumbles: to_number(&row.rec_fumble_lost),
        receiving_two_point_conv: to_number(&row.rec_two_point_conv),
        receiving_two_point_conv_expected: to_number(&row.rec_two_point_conv_exp),
        rushing_attempts: to_number(&row.rush_attempt),
        rushing_yards: to_number(&row.rush_yards_gained),
        rushing_yards_expected: to_number(&row.rush_yards_gained_exp),
        rushing_td: to_number(&row.rush_touchdown),
        rushing_td_expected: to_number(&row.rush_touchdown_exp),
        rushing_first_downs: to_number(&row.rush_first_down),
        rushing_first_downs_expected: to_number(&row.rush_first_down_exp),
        rushing_fantasy_points: to_number(&row.rush_fantasy_points),
        rushing_fantasy_points_expected: to_number(&row.rush_fantasy_points_exp),
        rushing_fumbles: to_number(&row.rush_fumble_lost),
        rushing_two_point_conv: to_number(&row.rush_two_point_conv),
        rushing_two_point_conv_expected: to_number(&row.rush_two_point_conv_exp),
        passing_attempts: to_number(&row.pass_attempt),
        passing_completions: to_number(&row.pass_completions),
        passing_completions_expected: to_number(&row.pass_completions_exp),
        passing_yards: to_number(&row.pass_yards_gained),
        passing_yards_expected: to_number(&row.pass_yards_gained_exp),
        passing_air_yards: to_number(&row.pass_air_yards),
        passing_td: to_number(&row.pass_touchdown),
        passing_td_expected: to_number(&row.pass_touchdown_exp),
        passing_first_downs: to_number(&row.pass_first_down),
        passing_first_downs_expected: to_number(&row.pass_first_down_exp),
        passing_fantasy_points: to_number(&row.pass_fantasy_points),
        passing_fantasy_points_expected: to_number(&row.pass_fantasy_points_exp),
        passing_interceptions: to_number(&row.pass_interception),
        passing_interceptions_expected: to_number(&row.pass_interception_exp),
        passing_two_point_conv: to_number(&row.pass_two_point_conv),
        passing_two_point_conv_expected: to_number(&row.pass_two_point_conv_exp),
        total_yards: to_number(&row.total_yards_gained),
        total_yards_expected: to_number(&row.total_yards_gained_exp),
        total_td: to_number(&row.total_touchdown),
        total_td_expected: to_number(&row.total_touchdown_exp),
        total_first_downs: to_number(&row.total_first_down),
        total_first_downs_expected: to_number(&row.total_first_down_exp),
        total_fantasy_points: to_number(&row.total_fantasy_points),
        total_fantasy_points_expected: to_number(&row.total_fantasy_points_exp),
        team_targets: to_number(&row.rec_attempt_team),
        team_rush_attempts: to_number(&row.rush_attempt_team),
        team_pass_attempts: to_number(&row.pass_attempt_team),
        team_receiving_air_yards: to_number(&row.rec_air_yards_team),
        team_passing_air_yards: to_number(&row.pass_air_yards_team),
        team_receptions: to_number(&row.receptions_team),
        team_receiving_yards: to_number(&row.rec_yards_gained_team),
        team_receiving_tds: to_number(&row.rec_touchdown_team),
        team_receiving_fantasy_points: to_number(&row.rec_fantasy_points_team),
        team_rushing_yards: to_number(&row.rush_yards_gained_team),
        team_rushing_tds: to_number(&row.rush_touchdown_team),
        team_rushing_fantasy_points: to_number(&row.rush_fantasy_points_team),
        team_passing_yards: to_number(&row.pass_yards_gained_team),
        team_passing_tds: to_number(&row.pass_touchdown_team),
        team_passing_fantasy_points: to_number(&row.pass_fantasy_points_team),
        team_passing_completions: to_number(&row.pass_completions_team),
        team_total_yards: to_number(&row.total_yards_gained_team),
        team_total_tds: to_number(&row.total_touchdown_team),
        team_total_fantasy_points: to_number(&row.total_fantasy_points_team),
    }
}

/// Batch normalization: a plain map over rows, no cross-row state.
pub fn normalize_opportunities(rows: &[RawOpportunityRecord]) -> Vec<OpportunityMetric> {
    rows.iter().map(normalize_opportunity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawOpportunityRecord {
        RawOpportunityRecord {
            season: RawValue::from("2025"),
            week: RawValue::from(3),
            full_name: Some("  Test Player ".to_string()),
            posteam: Some("KC".to_string()),
            position: Some("WR".to_string()),
            player_id: Some(" 00-0099999 ".to_string()),
            receptions: RawValue::from("5"),
            receptions_exp: RawValue::Null,
            rec_attempt: RawValue::from("8"),
            rec_yards_gained: RawValue::from(62.0),
            rec_yards_gained_exp: RawValue::from("55.4"),
            rec_attempt_team: RawValue::from("31"),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_maps_and_trims_identity() {
        let metric = normalize_opportunity(&sample_raw());
        assert_eq!(metric.season, 2025);
        assert_eq!(metric.week, 3);
        assert_eq!(metric.player_id, "00-0099999");
        assert_eq!(metric.full_name, "Test Player");
        assert_eq!(metric.team, "KC");
        assert_eq!(metric.position, "WR");
    }

    #[test]
    fn test_normalize_coerces_stats() {
        let metric = normalize_opportunity(&sample_raw());
        assert_eq!(metric.receptions, 5.0);
        assert_eq!(metric.receptions_expected, 0.0);
        assert_eq!(metric.targets, 8.0);
        assert_eq!(metric.receiving_yards, 62.0);
        assert_eq!(metric.receiving_yards_expected, 55.4);
        assert_eq!(metric.team_targets, 31.0);
    }

    #[test]
    fn test_normalize_defaults_everything_on_empty_row() {
        let metric = normalize_opportunity(&RawOpportunityRecord::default());
        assert_eq!(metric, OpportunityMetric::default());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        // Round-trip a normalized record back through the raw shape; a second
        // normalization must not drift.
        let first = normalize_opportunity(&sample_raw());
        let requoted = RawOpportunityRecord {
            season: RawValue::from(first.season),
            week: RawValue::from(first.week),
            full_name: Some(first.full_name.clone()),
            posteam: Some(first.team.clone()),
            position: Some(first.position.clone()),
            player_id: Some(first.player_id.clone()),
            receptions: RawValue::from(first.receptions),
            receptions_exp: RawValue::from(first.receptions_expected),
            rec_attempt: RawValue::from(first.targets),
            rec_yards_gained: RawValue::from(first.receiving_yards),
            rec_yards_gained_exp: RawValue::from(first.receiving_yards_expected),
            rec_attempt_team: RawValue::from(first.team_targets),
            ..Default::default()
        };
        let second = normalize_opportunity(&requoted);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_numeric_field_finite_under_hostile_input() {
        let hostile = RawOpportunityRecord {
            season: RawValue::Number(f64::NAN),
            week: RawValue::from("not-a-week"),
            receptions: RawValue::Number(f64::INFINITY),
            rec_attempt: RawValue::from("1e999"),
            total_fantasy_points: RawValue::from("NaN"),
            ..Default::default()
        };
        let metric = normalize_opportunity(&hostile);
        let encoded = serde_json::to_value(&metric).unwrap();
        for (key, value) in encoded.as_object().unwrap() {
            if let Some(n) = value.as_f64() {
                assert!(n.is_finite(), "field {} not finite", key);
            } else {
                assert!(value.is_string(), "field {} is neither number nor string", key);
            }
        }
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let encoded = serde_json::to_value(OpportunityMetric::default()).unwrap();
        let object = encoded.as_object().unwrap();
        assert!(object.contains_key("playerId"));
        assert!(object.contains_key("receptionsExpected"));
        assert!(object.contains_key("teamRushAttempts"));
        assert!(!object.contains_key("player_id"));
    }
}
