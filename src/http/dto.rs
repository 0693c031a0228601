//! Data Transfer Objects for the HTTP API.
//!
//! Most response shapes are the service-layer view models re-exported here,
//! since they already derive Serialize with the camelCase field names the
//! clients consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export the view models that serve directly as response bodies.
pub use crate::db::services::PlayerSearchResult;
pub use crate::metrics::{MetricSummary, WeekPoint};
pub use crate::models::{OpportunityMetric, PlayerProjection};
pub use crate::services::explorer::ExplorerFilter;
pub use crate::services::player::PlayerPage;
pub use crate::services::projections::ProjectionDetail;
pub use crate::services::ticker::{TickerData, TickerItem};

/// Request body for `POST /api/players/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Request body for `POST /api/players/ff-opportunity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistoryRequest {
    #[serde(default)]
    pub player_id: Option<String>,
}

/// Query parameters for the projections list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionsQuery {
    /// Sort column (store column name, e.g. `projected_points`).
    #[serde(default)]
    pub order_by: Option<String>,
    /// `asc` or `desc`.
    #[serde(default)]
    pub order: Option<String>,
}

/// One catalog entry as exposed to selector UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricInfo {
    pub id: String,
    pub label: String,
    pub category: String,
    pub description: String,
    pub calculated: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Server time of the check
    pub timestamp: DateTime<Utc>,
}
