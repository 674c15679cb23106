//! # Countries TUI
//!
//! A terminal browser for the public countries GraphQL service.
//!
//! ## Features
//! - One GraphQL query on startup, shown as loading / error / table
//! - Per-column case-insensitive filters, combined with AND
//! - Stable sort on any column, ascending or descending
//! - Pagination with selectable page sizes
//! - Export of every filtered and sorted row to `Countries.xlsx`
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)
//! - Export Layer (blocking pool)

pub mod models;
pub mod config;
pub mod constants;
pub mod table;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;
pub mod export;

// Re-export commonly used types
pub use models::{Column, Country, FilterState, Language, PageState, QueryState, SortDirection, SortState};
pub use config::Config;
pub use table::{sorted_rows, visible_rows, TableView};
pub use messages::{ExportCommand, ExportResponse, NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
pub use export::ExportActor;
