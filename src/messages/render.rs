//! Render state - data structure sent from App layer to UI for rendering

use crate::constants::DEFAULT_ENDPOINT;
use crate::messages::ui_events::InputMode;
use crate::models::{Column, FilterState, PageState, SortState};
use crate::table::TableView;

/// What the table area should show
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryStatus {
    #[default]
    Loading,
    Error(String),
    Ready,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub endpoint: String,
    pub status: QueryStatus,

    // Table
    pub table: TableView,
    pub sort: SortState,
    pub filters: FilterState,
    pub page: PageState,
    pub selected_column: Column,

    // Filter editing
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Footer
    pub status_message: Option<String>,
    pub is_exporting: bool,
    pub fetch_time_ms: u64,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            endpoint: String::from(DEFAULT_ENDPOINT),
            status: QueryStatus::Loading,
            table: TableView::default(),
            sort: SortState::default(),
            filters: FilterState::default(),
            page: PageState::default(),
            selected_column: Column::Name,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status_message: None,
            is_exporting: false,
            fetch_time_ms: 0,
            show_help: false,
        }
    }
}
