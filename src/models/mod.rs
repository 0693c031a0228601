//! Data model for the dashboard: raw store records and normalized view models.
//!
//! The upstream pipeline serializes Postgres `numeric` columns as JSON
//! strings, so every stat cell can arrive as text, a number, or null. The
//! types here capture that loose shape ([`RawValue`]) and the normalization
//! boundary that turns it into fully-typed, zero-defaulted records the rest
//! of the crate can trust.

pub mod coerce;
pub mod opportunity;
pub mod projection;
pub mod slug;

pub use coerce::{to_integer, to_number, to_text, RawValue};
pub use opportunity::{
    normalize_opportunities, normalize_opportunity, OpportunityMetric, RawOpportunityRecord,
};
pub use projection::{
    normalize_projection, normalize_projections, PlayerProjection, RawProjectionRecord,
};
pub use slug::{player_key_to_slug, slug_to_player_key, title_case};

/// The season the dashboard currently serves. The store holds history for
/// earlier seasons, but every page and API route pins its queries to this
/// value, matching the upstream pipeline's active season.
pub const CURRENT_SEASON: i32 = 2025;
