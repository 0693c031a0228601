//! Diesel schema for the pipeline-owned tables.
//!
//! The external ETL pipeline owns and writes these tables; this application
//! never migrates them. Stat columns are `numeric` (hence nullable
//! `Numeric` here) because the pipeline writes arbitrary-precision values,
//! and identity columns are nullable because upstream joins can leave
//! gaps; the normalizer downstream absorbs both.

diesel::table! {
    nflreadr_nfl_ff_opportunity (season, week, player_id) {
        season -> Nullable<Int4>,
        week -> Nullable<Int4>,
        full_name -> Nullable<Text>,
        posteam -> Nullable<Text>,
        position -> Nullable<Text>,
        player_id -> Nullable<Text>,
        receptions -> Nullable<Numeric>,
        rec_attempt -> Nullable<Numeric>,
        rush_attempt -> Nullable<Numeric>,
        pass_attempt -> Nullable<Numeric>,
        pass_completions -> Nullable<Numeric>,
        pass_completions_exp -> Nullable<Numeric>,
        rec_yards_gained -> Nullable<Numeric>,
        rec_air_yards -> Nullable<Numeric>,
        pass_air_yards -> Nullable<Numeric>,
        total_touchdown -> Nullable<Numeric>,
        total_yards_gained -> Nullable<Numeric>,
        total_fantasy_points -> Nullable<Numeric>,
        total_first_down -> Nullable<Numeric>,
        rec_touchdown -> Nullable<Numeric>,
        rec_first_down -> Nullable<Numeric>,
        rec_fantasy_points -> Nullable<Numeric>,
        rec_interception -> Nullable<Numeric>,
        rec_interception_exp -> Nullable<Numeric>,
        rec_fumble_lost -> Nullable<Numeric>,
        rec_two_point_conv -> Nullable<Numeric>,
        rec_two_point_conv_exp -> Nullable<Numeric>,
        rush_touchdown -> Nullable<Numeric>,
        rush_yards_gained -> Nullable<Numeric>,
        rush_first_down -> Nullable<Numeric>,
        rush_fantasy_points -> Nullable<Numeric>,
        rush_fumble_lost -> Nullable<Numeric>,
        rush_two_point_conv -> Nullable<Numeric>,
        rush_two_point_conv_exp -> Nullable<Numeric>,
        pass_yards_gained -> Nullable<Numeric>,
        pass_yards_gained_exp -> Nullable<Numeric>,
        pass_touchdown -> Nullable<Numeric>,
        pass_touchdown_exp -> Nullable<Numeric>,
        pass_first_down -> Nullable<Numeric>,
        pass_first_down_exp -> Nullable<Numeric>,
        pass_fantasy_points -> Nullable<Numeric>,
        pass_fantasy_points_exp -> Nullable<Numeric>,
        pass_interception -> Nullable<Numeric>,
        pass_interception_exp -> Nullable<Numeric>,
        pass_two_point_conv -> Nullable<Numeric>,
        pass_two_point_conv_exp -> Nullable<Numeric>,
        receptions_exp -> Nullable<Numeric>,
        rec_yards_gained_exp -> Nullable<Numeric>,
        rec_touchdown_exp -> Nullable<Numeric>,
        rec_first_down_exp -> Nullable<Numeric>,
        rec_fantasy_points_exp -> Nullable<Numeric>,
        rush_yards_gained_exp -> Nullable<Numeric>,
        rush_touchdown_exp -> Nullable<Numeric>,
        rush_first_down_exp -> Nullable<Numeric>,
        rush_fantasy_points_exp -> Nullable<Numeric>,
        total_yards_gained_exp -> Nullable<Numeric>,
        total_touchdown_exp -> Nullable<Numeric>,
        total_first_down_exp -> Nullable<Numeric>,
        total_fantasy_points_exp -> Nullable<Numeric>,
        total_fantasy_points_diff -> Nullable<Numeric>,
        rec_attempt_team -> Nullable<Numeric>,
        rush_attempt_team -> Nullable<Numeric>,
        pass_attempt_team -> Nullable<Numeric>,
        rec_air_yards_team -> Nullable<Numeric>,
        pass_air_yards_team -> Nullable<Numeric>,
        receptions_team -> Nullable<Numeric>,
        rec_yards_gained_team -> Nullable<Numeric>,
        rec_touchdown_team -> Nullable<Numeric>,
        rec_fantasy_points_team -> Nullable<Numeric>,
        rush_yards_gained_team -> Nullable<Numeric>,
        rush_touchdown_team -> Nullable<Numeric>,
        rush_fantasy_points_team -> Nullable<Numeric>,
        pass_yards_gained_team -> Nullable<Numeric>,
        pass_touchdown_team -> Nullable<Numeric>,
        pass_fantasy_points_team -> Nullable<Numeric>,
        pass_completions_team -> Nullable<Numeric>,
        total_yards_gained_team -> Nullable<Numeric>,
        total_touchdown_team -> Nullable<Numeric>,
        total_fantasy_points_team -> Nullable<Numeric>,
    }
}

diesel::table! {
    player_projection (player_key, season, week, source) {
        pos -> Nullable<Text>,
        source -> Nullable<Text>,
        #[sql_name = "player.x"]
        player_x -> Nullable<Text>,
        #[sql_name = "player.y"]
        player_y -> Nullable<Text>,
        player_key -> Nullable<Text>,
        season -> Nullable<Int4>,
        week -> Nullable<Int4>,
        team -> Nullable<Text>,
        projected_points -> Nullable<Float8>,
        fantasy_points -> Nullable<Float8>,
    }
}
