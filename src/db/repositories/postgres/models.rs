//! Diesel row models and conversions into the crate's raw record types.
//!
//! `numeric` columns load as `BigDecimal` and are carried into
//! [`RawValue::Text`] so the normalizer applies one parsing policy for both
//! backends, with precision preserved exactly as the store returned it.

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use super::schema::{nflreadr_nfl_ff_opportunity, player_projection};
use crate::models::{RawOpportunityRecord, RawProjectionRecord, RawValue};

fn numeric(value: Option<BigDecimal>) -> RawValue {
    match value {
        Some(decimal) => RawValue::Text(decimal.to_string()),
        None => RawValue::Null,
    }
}

fn integer(value: Option<i32>) -> RawValue {
    match value {
        Some(number) => RawValue::Number(number as f64),
        None => RawValue::Null,
    }
}

/// One full row of the opportunity table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = nflreadr_nfl_ff_opportunity)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OpportunityRow {
    pub season: Option<i32>,
    pub week: Option<i32>,
    pub full_name: Option<String>,
    pub posteam: Option<String>,
    pub position: Option<String>,
    pub player_id: Option<String>,
    pub receptions: Option<BigDecimal>,
    pub rec_attempt: Option<BigDecimal>,
    pub rush_attempt: Option<BigDecimal>,
    pub pass_attempt: Option<BigDecimal>,
    pub pass_completions: Option<BigDecimal>,
    pub pass_completions_exp: Option<BigDecimal>,
    pub rec_yards_gained: Option<BigDecimal>,
    pub rec_air_yards: Option<BigDecimal>,
    pub pass_air_yards: Option<BigDecimal>,
    pub total_touchdown: Option<BigDecimal>,
    pub total_yards_gained: Option<BigDecimal>,
    pub total_fantasy_points: Option<BigDecimal>,
    pub total_first_down: Option<BigDecimal>,
    pub rec_touchdown: Option<BigDecimal>,
    pub rec_first_down: Option<BigDecimal>,
    pub rec_fantasy_points: Option<BigDecimal>,
    pub rec_interception: Option<BigDecimal>,
    pub rec_interception_exp: Option<BigDecimal>,
    pub rec_fumble_lost: Option<BigDecimal>,
    pub rec_two_point_conv: Option<BigDecimal>,
    pub rec_two_point_conv_exp: Option<BigDecimal>,
    pub rush_touchdown: Option<BigDecimal>,
    pub rush_yards_gained: Option<BigDecimal>,
    pub rush_first_down: Option<BigDecimal>,
    pub rush_fantasy_points: Option<BigDecimal>,
    pub rush_fumble_lost: Option<BigDecimal>,
    pub rush_two_point_conv: Option<BigDecimal>,
    pub rush_two_point_conv_exp: Option<BigDecimal>,
    pub pass_yards_gained: Option<BigDecimal>,
    pub pass_yards_gained_exp: Option<BigDecimal>,
    pub pass_touchdown: Option<BigDecimal>,
    pub pass_touchdown_exp: Option<BigDecimal>,
    pub pass_first_down: Option<BigDecimal>,
    pub pass_first_down_exp: Option<BigDecimal>,
    pub pass_fantasy_points: Option<BigDecimal>,
    pub pass_fantasy_points_exp: Option<BigDecimal>,
    pub pass_interception: Option<BigDecimal>,
    pub pass_interception_exp: Option<BigDecimal>,
    pub pass_two_point_conv: Option<BigDecimal>,
    pub pass_two_point_conv_exp: Option<BigDecimal>,
    pub receptions_exp: Option<BigDecimal>,
    pub rec_yards_gained_exp: Option<BigDecimal>,
    pub rec_touchdown_exp: Option<BigDecimal>,
    pub rec_first_down_exp: Option<BigDecimal>,
    pub rec_fantasy_points_exp: Option<BigDecimal>,
    pub rush_yards_gained_exp: Option<BigDecimal>,
    pub rush_touchdown_exp: Option<BigDecimal>,
    pub rush_first_down_exp: Option<BigDecimal>,
    pub rush_fantasy_points_exp: Option<BigDecimal>,
    pub total_yards_gained_exp: Option<BigDecimal>,
    pub total_touchdown_exp: Option<BigDecimal>,
    pub total_first_down_exp: Option<BigDecimal>,
    pub total_fantasy_points_exp: Option<BigDecimal>,
    pub total_fantasy_points_diff: Option<BigDecimal>,
    pub rec_attempt_team: Option<BigDecimal>,
    pub rush_attempt_team: Option<BigDecimal>,
    pub pass_attempt_team: Option<BigDecimal>,
    pub rec_air_yards_team: Option<BigDecimal>,
    pub pass_air_yards_team: Option<BigDecimal>,
    pub receptions_team: Option<BigDecimal>,
    pub rec_yards_gained_team: Option<BigDecimal>,
    pub rec_touchdown_team: Option<BigDecimal>,
    pub rec_fantasy_points_team: Option<BigDecimal>,
    pub rush_yards_gained_team: Option<BigDecimal>,
    pub rush_touchdown_team: Option<BigDecimal>,
    pub rush_fantasy_points_team: Option<BigDecimal>,
    pub pass_yards_gained_team: Option<BigDecimal>,
    pub pass_touchdown_team: Option<BigDecimal>,
    pub pass_fantasy_points_team: Option<BigDecimal>,
    pub pass_completions_team: Option<BigDecimal>,
    pub total_yards_gained_team: Option<BigDecimal>,
    pub total_touchdown_team: Option<BigDecimal>,
    pub total_fantasy_points_team: Option<BigDecimal>,
}

impl From<OpportunityRow> for RawOpportunityRecord {
    fn from(row: OpportunityRow) -> Self {
        RawOpportunityRecord {
            season: integer(row.season),
            week: integer(row.week),
            full_name: row.full_name,
            posteam: row.posteam,
            position: row.position,
            player_id: row.player_id,
            receptions: numeric(row.receptions),
            rec_attempt: numeric(row.rec_attempt),
            rush_attempt: numeric(row.rush_attempt),
            pass_attempt: numeric(row.pass_attempt),
            pass_completions: numeric(row.pass_completions),
            pass_completions_exp: numeric(row.pass_completions_exp),
            rec_yards_gained: numeric(row.rec_yards_gained),
            rec_air_yards: numeric(row.rec_air_yards),
            pass_air_yards: numeric(row.pass_air_yards),
            total_touchdown: numeric(row.total_touchdown),
            total_yards_gained: numeric(row.total_yards_gained),
            total_fantasy_points: numeric(row.total_fantasy_points),
            total_first_down: numeric(row.total_first_down),
            rec_touchdown: numeric(row.rec_touchdown),
            rec_first_down: numeric(row.rec_first_down),
            rec_fantasy_points: numeric(row.rec_fantasy_points),
            rec_interception: numeric(row.rec_interception),
            rec_interception_exp: numeric(row.rec_interception_exp),
            rec_fumble_lost: numeric(row.rec_fumble_lost),
            rec_two_point_conv: numeric(row.rec_two_point_conv),
            rec_two_point_conv_exp: numeric(row.rec_two_point_conv_exp),
            rush_touchdown: numeric(row.rush_touchdown),
            rush_yards_gained: numeric(row.rush_yards_gained),
            rush_first_down: numeric(row.rush_first_down),
            rush_fantasy_points: numeric(row.rush_fantasy_points),
            rush_fumble_lost: numeric(row.rush_fumble_lost),
            rush_two_point_conv: numeric(row.rush_two_point_conv),
            rush_two_point_conv_exp: numeric(row.rush_two_point_conv_exp),
            pass_yards_gained: numeric(row.pass_yards_gained),
            pass_yards_gained_exp: numeric(row.pass_yards_gained_exp),
            pass_touchdown: numeric(row.pass_touchdown),
            pass_touchdown_exp: numeric(row.pass_touchdown_exp),
            pass_first_down: numeric(row.pass_first_down),
            pass_first_down_exp: numeric(row.pass_first_down_exp),
            pass_fantasy_points: numeric(row.pass_fantasy_points),
            pass_fantasy_points_exp: numeric(row.pass_fantasy_points_exp),
            pass_interception: numeric(row.pass_interception),
            pass_interception_exp: numeric(row.pass_interception_exp),
            pass_two_point_conv: numeric(row.pass_two_point_conv),
            pass_two_point_conv_exp: numeric(row.pass_two_point_conv_exp),
            receptions_exp: numeric(row.receptions_exp),
            rec_yards_gained_exp: numeric(row.rec_yards_gained_exp),
            rec_touchdown_exp: numeric(row.rec_touchdown_exp),
            rec_first_down_exp: numeric(row.rec_first_down_exp),
            rec_fantasy_points_exp: numeric(row.rec_fantasy_points_exp),
            rush_yards_gained_exp: numeric(row.rush_yards_gained_exp),
            rush_touchdown_exp: numeric(row.rush_touchdown_exp),
            rush_first_down_exp: numeric(row.rush_first_down_exp),
            rush_fantasy_points_exp: numeric(row.rush_fantasy_points_exp),
            total_yards_gained_exp: numeric(row.total_yards_gained_exp),
            total_touchdown_exp: numeric(row.total_touchdown_exp),
            total_first_down_exp: numeric(row.total_first_down_exp),
            total_fantasy_points_exp: numeric(row.total_fantasy_points_exp),
            total_fantasy_points_diff: numeric(row.total_fantasy_points_diff),
            rec_attempt_team: numeric(row.rec_attempt_team),
            rush_attempt_team: numeric(row.rush_attempt_team),
            pass_attempt_team: numeric(row.pass_attempt_team),
            rec_air_yards_team: numeric(row.rec_air_yards_team),
            pass_air_yards_team: numeric(row.pass_air_yards_team),
            receptions_team: numeric(row.receptions_team),
            rec_yards_gained_team: numeric(row.rec_yards_gained_team),
            rec_touchdown_team: numeric(row.rec_touchdown_team),
            rec_fantasy_points_team: numeric(row.rec_fantasy_points_team),
            rush_yards_gained_team: numeric(row.rush_yards_gained_team),
            rush_touchdown_team: numeric(row.rush_touchdown_team),
            rush_fantasy_points_team: numeric(row.rush_fantasy_points_team),
            pass_yards_gained_team: numeric(row.pass_yards_gained_team),
            pass_touchdown_team: numeric(row.pass_touchdown_team),
            pass_fantasy_points_team: numeric(row.pass_fantasy_points_team),
            pass_completions_team: numeric(row.pass_completions_team),
            total_yards_gained_team: numeric(row.total_yards_gained_team),
            total_touchdown_team: numeric(row.total_touchdown_team),
            total_fantasy_points_team: numeric(row.total_fantasy_points_team),
        }
    }
}

/// Narrow projection of the leader query columns.
#[derive(Debug, Queryable)]
pub struct DiffLeaderRow {
    pub full_name: Option<String>,
    pub posteam: Option<String>,
    pub position: Option<String>,
    pub week: Option<i32>,
    pub total_fantasy_points_diff: Option<BigDecimal>,
}

impl DiffLeaderRow {
    pub fn into_leader(self) -> crate::db::repository::DiffLeader {
        crate::db::repository::DiffLeader {
            full_name: self.full_name,
            posteam: self.posteam,
            position: self.position,
            week: integer(self.week),
            total_fantasy_points_diff: numeric(self.total_fantasy_points_diff),
        }
    }
}

/// Narrow projection of the name-search columns.
#[derive(Debug, Queryable)]
pub struct PlayerNameRowDb {
    pub full_name: Option<String>,
    pub player_id: Option<String>,
    pub position: Option<String>,
    pub posteam: Option<String>,
}

/// One full row of the projection table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = player_projection)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectionRow {
    pub pos: Option<String>,
    pub source: Option<String>,
    pub player_x: Option<String>,
    pub player_y: Option<String>,
    pub player_key: Option<String>,
    pub season: Option<i32>,
    pub week: Option<i32>,
    pub team: Option<String>,
    pub projected_points: Option<f64>,
    pub fantasy_points: Option<f64>,
}

impl From<ProjectionRow> for RawProjectionRecord {
    fn from(row: ProjectionRow) -> Self {
        RawProjectionRecord {
            pos: row.pos,
            source: row.source,
            player_x: row.player_x,
            player_y: row.player_y,
            player_key: row.player_key,
            season: row.season,
            week: row.week,
            team: row.team,
            projected_points: row.projected_points,
            fantasy_points: row.fantasy_points,
        }
    }
}
