//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Error taxonomy: upstream query failure maps to
//! 500, validation failure to 400, and an empty result is data (an empty
//! array or a 404 page response), never an error.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use super::dto::{
    ExplorerFilter, HealthResponse, MetricInfo, OpportunityMetric, PlayerHistoryRequest,
    PlayerPage, PlayerProjection, PlayerSearchResult, ProjectionDetail, ProjectionsQuery,
    SearchRequest, TickerData,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::repository::{ProjectionOrder, ProjectionOrderBy};
use crate::db::services as db_services;
use crate::metrics::METRIC_CATALOG;
use crate::models::{slug_to_player_key, CURRENT_SEASON};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
        timestamp: Utc::now(),
    }))
}

// =============================================================================
// Stable JSON API (consumed by the comparison panel)
// =============================================================================

/// POST /api/players/search
///
/// Body `{"query": "..."}`. Queries shorter than two characters return an
/// empty list without touching the store; otherwise up to 20 players
/// deduplicated by id.
pub async fn search_players(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> HandlerResult<Vec<PlayerSearchResult>> {
    let query = request.query.unwrap_or_default();

    let results = db_services::search_players(state.repository.as_ref(), CURRENT_SEASON, &query)
        .await
        .map_err(|e| {
            tracing::error!("Player search error: {}", e);
            AppError::Internal("Search failed".to_string())
        })?;

    Ok(Json(results))
}

/// POST /api/players/ff-opportunity
///
/// Body `{"playerId": "..."}`. Returns the player's full week-ordered
/// normalized history for the current season, or an empty list when the id
/// has no rows. A missing id is a 400.
pub async fn player_opportunity_history(
    State(state): State<AppState>,
    Json(request): Json<PlayerHistoryRequest>,
) -> HandlerResult<Vec<OpportunityMetric>> {
    let player_id = match request.player_id {
        Some(ref id) if !id.is_empty() => id.clone(),
        _ => return Err(AppError::BadRequest("Player ID is required".to_string())),
    };

    let history =
        db_services::get_player_opportunities(state.repository.as_ref(), CURRENT_SEASON, &player_id)
            .await
            .map_err(|e| {
                tracing::error!("Player data fetch error: {}", e);
                AppError::Internal("Data fetch failed".to_string())
            })?;

    Ok(Json(history))
}

// =============================================================================
// Page Data Endpoints
// =============================================================================

/// GET /api/ticker
///
/// The home page's biggest-swings strip for the latest loaded week.
pub async fn get_ticker(State(state): State<AppState>) -> HandlerResult<TickerData> {
    let ticker = services::build_ticker(state.repository.as_ref(), CURRENT_SEASON).await?;
    Ok(Json(ticker))
}

/// GET /api/opportunities
///
/// The opportunity explorer dataset: every normalized row of the season,
/// optionally filtered by `player`, `team`, `position`, and `week`.
pub async fn list_opportunities(
    State(state): State<AppState>,
    Query(filter): Query<ExplorerFilter>,
) -> HandlerResult<Vec<OpportunityMetric>> {
    let rows = services::load_explorer(state.repository.as_ref(), CURRENT_SEASON).await?;
    Ok(Json(services::apply_filters(rows, &filter)))
}

/// GET /api/opportunities/{player_key}
///
/// Player detail page payload resolved from the URL slug; 404 when neither
/// the exact nor the fuzzy name lookup finds rows.
pub async fn get_opportunity_player(
    State(state): State<AppState>,
    Path(player_key): Path<String>,
) -> HandlerResult<PlayerPage> {
    let key = slug_to_player_key(&player_key);
    let page = services::load_player_page(state.repository.as_ref(), CURRENT_SEASON, &key).await?;

    match page {
        Some(page) => Ok(Json(page)),
        None => Err(AppError::NotFound("Player not found".to_string())),
    }
}

/// GET /api/projections
///
/// The projections table dataset. `order_by` takes a store column name and
/// `order` is `asc`/`desc`; the default is projected points, highest first.
pub async fn list_projections(
    State(state): State<AppState>,
    Query(query): Query<ProjectionsQuery>,
) -> HandlerResult<Vec<PlayerProjection>> {
    let by = match query.order_by {
        Some(ref column) => column
            .parse::<ProjectionOrderBy>()
            .map_err(AppError::BadRequest)?,
        None => ProjectionOrderBy::ProjectedPoints,
    };
    let descending = match query.order.as_deref() {
        None => true,
        Some("desc") => true,
        Some("asc") => false,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown sort order: {}",
                other
            )))
        }
    };

    let rows = services::load_projections(
        state.repository.as_ref(),
        ProjectionOrder { by, descending },
    )
    .await?;
    Ok(Json(rows))
}

/// GET /api/projections/{player_key}
///
/// Projection detail page payload; 404 when the player has no rows.
pub async fn get_projection_player(
    State(state): State<AppState>,
    Path(player_key): Path<String>,
) -> HandlerResult<ProjectionDetail> {
    let key = slug_to_player_key(&player_key);
    let detail = services::load_projection_detail(state.repository.as_ref(), &key).await?;

    match detail {
        Some(detail) => Ok(Json(detail)),
        None => Err(AppError::NotFound("Player not found".to_string())),
    }
}

/// GET /api/metrics
///
/// The metric catalog, for rendering selector UIs.
pub async fn list_metrics() -> Json<Vec<MetricInfo>> {
    Json(
        METRIC_CATALOG
            .iter()
            .map(|metric| MetricInfo {
                id: metric.id.to_string(),
                label: metric.label.to_string(),
                category: metric.category.label().to_string(),
                description: metric.description.to_string(),
                calculated: metric.is_calculated(),
            })
            .collect(),
    )
}
