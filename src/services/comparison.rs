//! Multi-player comparison state: selection, palette, metrics, debounce.
//!
//! The comparison panel is session-scoped UI state with no persistence: a
//! small ordered set of players (each bound to a palette color by insertion
//! order), a set of selected metric ids, and a line/scatter mode toggle.
//! All of it is modeled as plain values threaded through updates, with no
//! global mutable state.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::metrics::{evaluate, find_metric, summarize, MetricDefinition, MetricSummary, Sample};
use crate::models::OpportunityMetric;

/// Selection cap, chosen for chart readability.
pub const PLAYER_COMPARISON_CAP: usize = 6;

/// Fixed comparison palette, assigned by insertion order.
pub const COLOR_PALETTE: [&str; 8] = [
    "#2563eb", // blue
    "#f97316", // orange
    "#16a34a", // green
    "#dc2626", // red
    "#7c3aed", // purple
    "#db2777", // pink
    "#0ea5e9", // sky
    "#059669", // emerald
];

/// Palette bookkeeping: which color indices are currently held.
///
/// The first pass hands out the lowest unused index. Once every color is
/// held, assignment falls back to simple round-robin on selection order,
/// with no collision avoidance past the initial pass.
#[derive(Debug, Clone, Default)]
pub struct PaletteAllocator {
    used: BTreeSet<usize>,
}

impl PaletteAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a color index for the next selection slot.
    pub fn acquire(&mut self, selection_len: usize) -> usize {
        let mut index = 0;
        while index < COLOR_PALETTE.len() && self.used.contains(&index) {
            index += 1;
        }
        let index = if index >= COLOR_PALETTE.len() {
            selection_len % COLOR_PALETTE.len()
        } else {
            index
        };
        self.used.insert(index);
        index
    }

    /// Return a color index to the pool.
    pub fn release(&mut self, index: usize) {
        self.used.remove(&index);
    }

    /// Hex color for an index.
    pub fn color(index: usize) -> &'static str {
        COLOR_PALETTE[index % COLOR_PALETTE.len()]
    }
}

/// Chart rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationMode {
    #[default]
    Line,
    Scatter,
}

/// One selected player with their season history and assigned color.
#[derive(Debug, Clone)]
pub struct SelectedPlayer {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
    pub position: String,
    pub color_index: usize,
    pub rows: Vec<OpportunityMetric>,
}

impl SelectedPlayer {
    pub fn color(&self) -> &'static str {
        PaletteAllocator::color(self.color_index)
    }
}

/// One chart row: a week plus each selected player's sample for it, aligned
/// with [`ComparisonSession::players`]. `None` marks a bye/missing week.
#[derive(Debug, Clone)]
pub struct ComparisonWeekRow {
    pub week: i32,
    pub samples: Vec<Option<Sample>>,
}

/// Season-summary card data for one player.
#[derive(Debug, Clone)]
pub struct PlayerComparisonSummary {
    pub player_id: String,
    pub summary: MetricSummary,
}

/// The comparison panel's full session state.
///
/// Starts `Idle` (no players); adding the first player makes it `Active`.
/// When constructed from a player detail page the page's own player is
/// pinned and cannot be removed.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSession {
    players: Vec<SelectedPlayer>,
    palette: PaletteAllocator,
    selected_metrics: Vec<String>,
    mode: VisualizationMode,
    pinned_player_id: Option<String>,
}

impl ComparisonSession {
    /// New empty (idle) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// New session seeded with the detail page's primary player, pinned
    /// against removal.
    pub fn with_primary(
        player_id: impl Into<String>,
        player_name: impl Into<String>,
        team: impl Into<String>,
        position: impl Into<String>,
        rows: Vec<OpportunityMetric>,
    ) -> Self {
        let mut session = Self::new();
        let player_id = player_id.into();
        session.pinned_player_id = Some(player_id.clone());
        session.insert_player(player_id, player_name.into(), team.into(), position.into(), rows);
        session
    }

    pub fn is_idle(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[SelectedPlayer] {
        &self.players
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: VisualizationMode) {
        self.mode = mode;
    }

    /// Selected metric ids in insertion order (legends render in this
    /// order).
    pub fn selected_metric_ids(&self) -> &[String] {
        &self.selected_metrics
    }

    /// Resolved catalog definitions for the selection, skipping ids that
    /// have left the catalog.
    pub fn selected_metrics(&self) -> Vec<&'static MetricDefinition> {
        self.selected_metrics
            .iter()
            .filter_map(|id| find_metric(id))
            .collect()
    }

    /// Add a player. No-op when already present or at the cap. Returns
    /// whether the selection changed.
    pub fn add_player(
        &mut self,
        player_id: impl Into<String>,
        player_name: impl Into<String>,
        team: impl Into<String>,
        position: impl Into<String>,
        rows: Vec<OpportunityMetric>,
    ) -> bool {
        let player_id = player_id.into();
        if self.players.iter().any(|p| p.player_id == player_id) {
            return false;
        }
        if self.players.len() >= PLAYER_COMPARISON_CAP {
            return false;
        }
        self.insert_player(player_id, player_name.into(), team.into(), position.into(), rows);
        true
    }

    fn insert_player(
        &mut self,
        player_id: String,
        player_name: String,
        team: String,
        position: String,
        rows: Vec<OpportunityMetric>,
    ) {
        let color_index = self.palette.acquire(self.players.len());
        self.players.push(SelectedPlayer {
            player_id,
            player_name,
            team,
            position,
            color_index,
            rows,
        });
    }

    /// Remove a player by id. The pinned primary player is protected.
    /// Returns whether the selection changed.
    pub fn remove_player(&mut self, player_id: &str) -> bool {
        if self.pinned_player_id.as_deref() == Some(player_id) {
            return false;
        }
        let Some(position) = self.players.iter().position(|p| p.player_id == player_id) else {
            return false;
        };
        let removed = self.players.remove(position);
        self.palette.release(removed.color_index);
        true
    }

    /// Symmetric add/remove of a metric id. Unknown ids are ignored.
    /// Returns whether the metric is selected afterwards.
    pub fn toggle_metric(&mut self, metric_id: &str) -> bool {
        if find_metric(metric_id).is_none() {
            return false;
        }
        if let Some(index) = self.selected_metrics.iter().position(|id| id == metric_id) {
            self.selected_metrics.remove(index);
            false
        } else {
            self.selected_metrics.push(metric_id.to_string());
            true
        }
    }

    /// Chart data for one metric: the union of all selected players' weeks,
    /// ascending, with one optional sample per player per week.
    pub fn chart_rows(&self, metric_id: &str) -> Vec<ComparisonWeekRow> {
        let Some(metric) = find_metric(metric_id) else {
            return Vec::new();
        };

        let weeks: BTreeSet<i32> = self
            .players
            .iter()
            .flat_map(|player| player.rows.iter().map(|row| row.week))
            .collect();

        weeks
            .into_iter()
            .map(|week| ComparisonWeekRow {
                week,
                samples: self
                    .players
                    .iter()
                    .map(|player| {
                        player
                            .rows
                            .iter()
                            .find(|row| row.week == week)
                            .map(|row| evaluate(metric, row))
                    })
                    .collect(),
            })
            .collect()
    }

    /// Season summaries for one metric, one per player in selection order.
    pub fn summaries(&self, metric_id: &str) -> Vec<PlayerComparisonSummary> {
        let Some(metric) = find_metric(metric_id) else {
            return Vec::new();
        };
        self.players
            .iter()
            .map(|player| PlayerComparisonSummary {
                player_id: player.player_id.clone(),
                summary: summarize(metric, &player.rows),
            })
            .collect()
    }
}

/// Last-write-wins debounce for the player-name search box.
///
/// Each keystroke supersedes any pending search: submitting bumps the
/// generation, and a result is applied only if its ticket is still the
/// newest one after the quiet period. Queries below the length floor
/// short-circuit (and still invalidate older tickets).
#[derive(Debug, Clone, Default)]
pub struct SearchDebounce {
    generation: u64,
}

/// Token identifying one submitted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

impl SearchDebounce {
    /// Quiet period a ticket must survive before its query is issued.
    pub const QUIET_PERIOD: Duration = Duration::from_millis(300);

    /// Queries shorter than this never produce a ticket.
    pub const MIN_QUERY_LEN: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keystroke. Returns a ticket to attach to the eventual
    /// query, or `None` for short queries (which only cancel).
    pub fn submit(&mut self, query: &str) -> Option<SearchTicket> {
        self.generation += 1;
        if query.len() < Self::MIN_QUERY_LEN {
            return None;
        }
        Some(SearchTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Whether a ticket is still the newest submission; stale results are
    /// dropped.
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation
    }
}

#[cfg(test)]
#[path = "comparison_tests.rs"]
mod comparison_tests;
