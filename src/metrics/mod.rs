//! Derived metric catalog and evaluation engine.
//!
//! The catalog is a flat, static table of actual-versus-expected metric
//! definitions mixing direct field lookups with calculated rates and
//! shares. The engine evaluates a definition against one normalized
//! player-week, aggregates over a season scope, and formats values for
//! display.

pub mod catalog;
pub mod engine;

pub use catalog::{
    find_metric, MetricCategory, MetricDefinition, MetricKind, Sample, ValueFormat, METRIC_CATALOG,
};
pub use engine::{
    default_metric_ids, evaluate, format_value, summarize, summarize_range, weekly_series,
    MetricSummary, WeekPoint,
};
