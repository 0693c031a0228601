//! Service layer: page-level orchestration and interactive session state.
//!
//! Each submodule backs one surface of the dashboard: the home-page swing
//! ticker, the opportunity explorer table, the per-player detail page, the
//! projections pages, and the multi-player comparison panel's state
//! machine.

pub mod comparison;
pub mod explorer;
pub mod player;
pub mod projections;
pub mod ticker;

pub use comparison::{
    ComparisonSession, PaletteAllocator, SearchDebounce, SearchTicket, SelectedPlayer,
    VisualizationMode, COLOR_PALETTE, PLAYER_COMPARISON_CAP,
};
pub use explorer::{apply_filters, load_explorer, ExplorerFilter};
pub use player::{load_player_page, PlayerPage};
pub use projections::{load_projection_detail, load_projections, ProjectionDetail};
pub use ticker::{build_ticker, TickerData, TickerItem, TICKER_MAX_ITEMS, TICKER_QUERY_LIMIT};
