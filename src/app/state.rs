//! App state - pure data structure with no I/O logic

use crate::config::Config;
use crate::messages::render::QueryStatus;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{Column, FilterState, PageState, QueryState, SortState};
use crate::table::{self, TableView};

/// Main application state - pure data, no I/O
pub struct AppState {
    pub config: Config,

    // Query
    pub query: QueryState,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
    pub fetch_time_ms: u64,

    // Table controls
    pub sort: SortState,
    pub filters: FilterState,
    pub page: PageState,
    pub selected_column: Column,

    // Filter editing
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Export
    pub exports_in_flight: usize,

    // Footer and popups
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let page = PageState::new(config.page_size);
        AppState {
            config,
            query: QueryState::Loading,
            next_request_id: 1,
            pending_request_id: None,
            fetch_time_ms: 0,
            sort: SortState::default(),
            filters: FilterState::default(),
            page,
            selected_column: Column::Name,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            exports_in_flight: 0,
            status_message: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Filter text of the selected column
    pub fn current_input(&self) -> &str {
        self.filters.get(self.selected_column)
    }

    pub fn current_input_mut(&mut self) -> &mut String {
        self.filters.get_mut(self.selected_column)
    }

    /// Number of rows that pass the current filters
    pub fn filtered_count(&self) -> usize {
        match &self.query {
            QueryState::Ready(countries) => table::filter_rows(countries, &self.filters).len(),
            _ => 0,
        }
    }

    /// Current page of the table, derived from scratch
    pub fn table_view(&self) -> TableView {
        match &self.query {
            QueryState::Ready(countries) => {
                table::visible_rows(countries, &self.filters, self.sort, self.page)
            }
            _ => TableView::default(),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let status = match &self.query {
            QueryState::Loading => QueryStatus::Loading,
            QueryState::Error(message) => QueryStatus::Error(message.clone()),
            QueryState::Ready(_) => QueryStatus::Ready,
        };

        RenderState {
            endpoint: self.config.endpoint.clone(),
            status,
            table: self.table_view(),
            sort: self.sort,
            filters: self.filters.clone(),
            page: self.page,
            selected_column: self.selected_column,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            status_message: self.status_message.clone(),
            is_exporting: self.exports_in_flight > 0,
            fetch_time_ms: self.fetch_time_ms,
            show_help: self.show_help,
        }
    }
}
