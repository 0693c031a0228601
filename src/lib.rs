//! # Fantasy Freaks HQ Backend
//!
//! Rust backend for the Fantasy Freaks HQ statistics dashboard.
//!
//! This crate reads weekly player projection and opportunity ("actual versus
//! expected" usage) data from a hosted relational store and serves it as typed
//! view models through a REST API. All heavy modeling happens upstream in an
//! external data pipeline; this application normalizes what that pipeline
//! wrote, derives comparison metrics on demand, and keeps the small amount of
//! session state the comparison UI needs.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Raw database records and the normalized view models built
//!   from them, plus the coercion rules for the pipeline's loose typing
//! - [`metrics`]: The declarative metric catalog and the engine that
//!   evaluates, aggregates, and formats metrics per player-week
//! - [`db`]: Repository trait, local/Postgres backends, and the paginated
//!   fetch helpers the list pages rely on
//! - [`services`]: Page-level orchestration (ticker, explorer, player
//!   detail, projections) and the comparison/selection state machine
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! Every read is request-scoped and idempotent; there is no write path in
//! this application layer.

pub mod db;
pub mod metrics;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
