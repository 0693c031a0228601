//! Postgres repository implementation using Diesel.
//!
//! Implements the repository traits against the pipeline-owned tables. The
//! application never writes or migrates; every method is a read.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Connection health monitoring and query counters
//! - Blocking Diesel work moved off the async runtime with `spawn_blocking`
//!
//! Failed queries are surfaced as-is: per the application's error model a
//! query failure aborts the whole page or request, and reloading is the
//! retry.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    DiffDirection, DiffLeader, ErrorContext, FullRepository, OpportunityRepository, PlayerNameRow,
    ProjectionOrder, ProjectionOrderBy, ProjectionRepository, RepositoryError, RepositoryResult,
};
use crate::models::{RawOpportunityRecord, RawProjectionRecord};

mod models;
mod schema;

use models::{DiffLeaderRow, OpportunityRow, PlayerNameRowDb, ProjectionRow};
use schema::{nflreadr_nfl_ff_opportunity as opportunity, player_projection as projection};

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> RepositoryResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| {
                RepositoryError::configuration("DATABASE_URL or PG_DATABASE_URL must be set")
            })?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository with a connection pool.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Execute a blocking Diesel operation on the blocking thread pool.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut conn).map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                e.with_operation(operation)
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl OpportunityRepository for PostgresRepository {
    async fn latest_week(&self, season: i32) -> RepositoryResult<Option<i32>> {
        self.with_conn("latest_week", move |conn| {
            let week: Option<Option<i32>> = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .select(opportunity::week)
                .order(opportunity::week.desc())
                .first(conn)
                .optional()?;
            Ok(week.flatten())
        })
        .await
    }

    async fn fetch_week_diff_leaders(
        &self,
        season: i32,
        week: i32,
        direction: DiffDirection,
        limit: usize,
    ) -> RepositoryResult<Vec<DiffLeader>> {
        self.with_conn("fetch_week_diff_leaders", move |conn| {
            let base = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .filter(opportunity::week.eq(Some(week)))
                .select((
                    opportunity::full_name,
                    opportunity::posteam,
                    opportunity::position,
                    opportunity::week,
                    opportunity::total_fantasy_points_diff,
                ))
                .limit(limit as i64);

            let rows: Vec<DiffLeaderRow> = match direction {
                DiffDirection::Over => base
                    .order(opportunity::total_fantasy_points_diff.desc())
                    .load(conn)?,
                DiffDirection::Under => base
                    .order(opportunity::total_fantasy_points_diff.asc())
                    .load(conn)?,
            };
            Ok(rows.into_iter().map(DiffLeaderRow::into_leader).collect())
        })
        .await
    }

    async fn fetch_opportunity_page(
        &self,
        season: i32,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        self.with_conn("fetch_opportunity_page", move |conn| {
            let rows: Vec<OpportunityRow> = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .order((opportunity::season.desc(), opportunity::week.desc()))
                .offset(offset as i64)
                .limit(limit as i64)
                .select(OpportunityRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn fetch_player_opportunities(
        &self,
        season: i32,
        player_id: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let player_id = player_id.to_string();
        self.with_conn("fetch_player_opportunities", move |conn| {
            let rows: Vec<OpportunityRow> = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .filter(opportunity::player_id.eq(Some(player_id)))
                .order(opportunity::week.asc())
                .select(OpportunityRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn fetch_opportunities_by_name(
        &self,
        season: i32,
        full_name: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let full_name = full_name.to_string();
        self.with_conn("fetch_opportunities_by_name", move |conn| {
            let rows: Vec<OpportunityRow> = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .filter(opportunity::full_name.eq(Some(full_name)))
                .order(opportunity::week.asc())
                .select(OpportunityRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn fetch_opportunities_by_name_fuzzy(
        &self,
        season: i32,
        pattern: &str,
    ) -> RepositoryResult<Vec<RawOpportunityRecord>> {
        let pattern = pattern.to_string();
        self.with_conn("fetch_opportunities_by_name_fuzzy", move |conn| {
            let rows: Vec<OpportunityRow> = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .filter(opportunity::full_name.ilike(pattern))
                .order(opportunity::week.asc())
                .select(OpportunityRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn search_players(
        &self,
        season: i32,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<PlayerNameRow>> {
        let pattern = format!("%{}%", query);
        self.with_conn("search_players", move |conn| {
            let rows: Vec<PlayerNameRowDb> = opportunity::table
                .filter(opportunity::season.eq(Some(season)))
                .filter(opportunity::full_name.ilike(pattern))
                .filter(opportunity::full_name.is_not_null())
                .filter(opportunity::player_id.is_not_null())
                .select((
                    opportunity::full_name,
                    opportunity::player_id,
                    opportunity::position,
                    opportunity::posteam,
                ))
                .limit(limit as i64)
                .load(conn)?;

            Ok(rows
                .into_iter()
                .filter_map(|row| {
                    Some(PlayerNameRow {
                        player_id: row.player_id?,
                        full_name: row.full_name?,
                        team: row.posteam.unwrap_or_default(),
                        position: row.position.unwrap_or_default(),
                    })
                })
                .collect())
        })
        .await
    }
}

#[async_trait]
impl ProjectionRepository for PostgresRepository {
    async fn fetch_projection_page(
        &self,
        order: ProjectionOrder,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<Vec<RawProjectionRecord>> {
        self.with_conn("fetch_projection_page", move |conn| {
            let base = projection::table
                .offset(offset as i64)
                .limit(limit as i64)
                .select(ProjectionRow::as_select());

            let rows: Vec<ProjectionRow> = match (order.by, order.descending) {
                (ProjectionOrderBy::ProjectedPoints, true) => {
                    base.order(projection::projected_points.desc()).load(conn)?
                }
                (ProjectionOrderBy::ProjectedPoints, false) => {
                    base.order(projection::projected_points.asc()).load(conn)?
                }
                (ProjectionOrderBy::FantasyPoints, true) => {
                    base.order(projection::fantasy_points.desc()).load(conn)?
                }
                (ProjectionOrderBy::FantasyPoints, false) => {
                    base.order(projection::fantasy_points.asc()).load(conn)?
                }
                (ProjectionOrderBy::Season, true) => {
                    base.order(projection::season.desc()).load(conn)?
                }
                (ProjectionOrderBy::Season, false) => {
                    base.order(projection::season.asc()).load(conn)?
                }
                (ProjectionOrderBy::Week, true) => {
                    base.order(projection::week.desc()).load(conn)?
                }
                (ProjectionOrderBy::Week, false) => {
                    base.order(projection::week.asc()).load(conn)?
                }
            };
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn fetch_player_projections(
        &self,
        player_key: &str,
    ) -> RepositoryResult<Vec<RawProjectionRecord>> {
        let player_key = player_key.to_string();
        self.with_conn("fetch_player_projections", move |conn| {
            let rows: Vec<ProjectionRow> = projection::table
                .filter(projection::player_key.eq(Some(player_key)))
                .order((projection::season.asc(), projection::week.asc()))
                .select(ProjectionRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }
}
