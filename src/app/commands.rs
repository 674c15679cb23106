//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::constants::PAGE_SIZES;
use crate::messages::ui_events::InputMode;
use crate::messages::{ExportCommand, ExportResponse, NetworkCommand, NetworkResponse};
use crate::models::QueryState;
use crate::table;

impl AppState {
    // ========================
    // Query
    // ========================

    /// Start the countries query. Only one fetch is ever pending.
    pub fn start_fetch(&mut self) -> Option<NetworkCommand> {
        if self.pending_request_id.is_some() {
            return None;
        }
        let id = self.next_id();
        self.pending_request_id = Some(id);
        self.query = QueryState::Loading;

        Some(NetworkCommand::FetchCountries {
            id,
            endpoint: self.config.endpoint.clone(),
        })
    }

    /// Abandon the pending fetch, if any
    pub fn cancel_fetch(&mut self) -> Option<NetworkCommand> {
        self.pending_request_id.take().map(NetworkCommand::CancelFetch)
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        // Responses for abandoned fetches are dropped
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Dropping stale response");
            return;
        }
        self.pending_request_id = None;

        match response {
            NetworkResponse::Countries { countries, time_ms, .. } => {
                self.query = QueryState::Ready(countries);
                self.fetch_time_ms = time_ms;
                self.clamp_page();
            }
            NetworkResponse::Error { message, time_ms, .. } => {
                self.query = QueryState::Error(message);
                self.fetch_time_ms = time_ms;
            }
        }
    }

    // ========================
    // Column selection
    // ========================

    pub fn next_column(&mut self) {
        self.selected_column = self.selected_column.next();
    }

    pub fn prev_column(&mut self) {
        self.selected_column = self.selected_column.prev();
    }

    // ========================
    // Filter editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
        self.clamp_page();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
        self.clamp_page();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.cursor_position = 0;
        self.clamp_page();
    }

    // ========================
    // Sorting
    // ========================

    pub fn sort_selected(&mut self) {
        self.sort.toggle(self.selected_column);
    }

    // ========================
    // Pagination
    // ========================

    /// Pull the page index back inside the filtered set
    pub fn clamp_page(&mut self) {
        let count = self.filtered_count();
        self.page.clamp(count);
    }

    pub fn next_page(&mut self) {
        let page_count = self.page.page_count(self.filtered_count());
        if self.page.page + 1 < page_count {
            self.page.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page.page = self.page.page.saturating_sub(1);
    }

    pub fn larger_page_size(&mut self) {
        if let Some(size) = PAGE_SIZES.iter().find(|s| **s > self.page.page_size) {
            self.page.set_page_size(*size);
        }
    }

    pub fn smaller_page_size(&mut self) {
        if let Some(size) = PAGE_SIZES.iter().rev().find(|s| **s < self.page.page_size) {
            self.page.set_page_size(*size);
        }
    }

    // ========================
    // Export
    // ========================

    /// Snapshot every filtered and sorted row, ignoring the current page
    pub fn prepare_export(&mut self) -> Option<ExportCommand> {
        let rows = match &self.query {
            QueryState::Ready(countries) => table::sorted_rows(countries, &self.filters, self.sort),
            _ => {
                self.status_message = Some(String::from("Nothing to export yet"));
                return None;
            }
        };

        let id = self.next_id();
        let path = self.config.export_path();
        self.exports_in_flight += 1;
        self.status_message = Some(format!("Exporting {} rows...", rows.len()));

        Some(ExportCommand::WriteSpreadsheet { id, rows, path })
    }

    pub fn handle_export_response(&mut self, response: ExportResponse) {
        tracing::debug!(id = response.id(), "Export finished");
        self.exports_in_flight = self.exports_in_flight.saturating_sub(1);

        self.status_message = Some(match response {
            ExportResponse::Saved { path, rows, .. } => {
                format!("Exported {} rows to {}", rows, path.display())
            }
            ExportResponse::Failed { message, .. } => format!("Export failed: {}", message),
        });
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Column, Country, SortDirection};

    fn ready_state(countries: Vec<Country>, page_size: usize) -> AppState {
        let mut state = AppState::new(Config {
            page_size,
            ..Config::default()
        });
        let cmd = state.start_fetch();
        let id = match cmd {
            Some(NetworkCommand::FetchCountries { id, .. }) => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::Countries { id, countries, time_ms: 12 });
        state
    }

    fn many(n: usize) -> Vec<Country> {
        (0..n)
            .map(|i| Country::new(format!("Country {:03}", i)).with_currency(if i % 2 == 0 { "EUR" } else { "USD" }))
            .collect()
    }

    fn type_text(state: &mut AppState, text: &str) {
        state.start_editing();
        for c in text.chars() {
            state.enter_char(c);
        }
        state.stop_editing();
    }

    #[test]
    fn test_single_fetch_in_flight() {
        let mut state = AppState::default();
        assert!(state.start_fetch().is_some());
        assert!(state.start_fetch().is_none());
        assert_eq!(state.query, QueryState::Loading);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = AppState::default();
        let first = state.start_fetch();
        assert!(matches!(state.cancel_fetch(), Some(NetworkCommand::CancelFetch(1))));
        assert!(first.is_some());

        state.handle_response(NetworkResponse::Countries {
            id: 1,
            countries: many(3),
            time_ms: 5,
        });
        assert_eq!(state.query, QueryState::Loading);
    }

    #[test]
    fn test_error_is_terminal() {
        let mut state = AppState::default();
        state.start_fetch();
        state.handle_response(NetworkResponse::Error {
            id: 1,
            message: String::from("Connection failed: refused"),
            time_ms: 3,
        });
        assert_eq!(state.query, QueryState::Error(String::from("Connection failed: refused")));
        assert_eq!(state.pending_request_id, None);
        assert!(state.to_render_state().table.rows.is_empty());
    }

    #[test]
    fn test_sort_selected_column() {
        let mut state = ready_state(vec![Country::new("Chad"), Country::new("Benin")], 10);
        let names = |s: &AppState| s.table_view().rows.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&state), vec!["Benin", "Chad"]);

        state.sort_selected();
        assert_eq!(state.sort.direction, SortDirection::Descending);
        assert_eq!(names(&state), vec!["Chad", "Benin"]);

        state.next_column();
        state.sort_selected();
        assert_eq!(state.sort.column, Column::Capital);
        assert_eq!(state.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_filter_typing_clamps_page() {
        let mut state = ready_state(many(30), 5);
        for _ in 0..5 {
            state.next_page();
        }
        assert_eq!(state.page.page, 5);

        // Narrow to one row: the stored page must come back to 0
        state.selected_column = Column::Name;
        type_text(&mut state, "country 007");
        assert_eq!(state.filtered_count(), 1);
        assert_eq!(state.page.page, 0);
        assert_eq!(state.table_view().rows.len(), 1);
        assert_eq!(state.table_view().empty_rows, 4);
    }

    #[test]
    fn test_next_page_stops_at_last() {
        let mut state = ready_state(many(12), 5);
        for _ in 0..10 {
            state.next_page();
        }
        assert_eq!(state.page.page, 2);
        state.prev_page();
        state.prev_page();
        state.prev_page();
        assert_eq!(state.page.page, 0);
    }

    #[test]
    fn test_page_size_steps_reset_page() {
        let mut state = ready_state(many(60), 10);
        state.next_page();
        state.larger_page_size();
        assert_eq!(state.page.page_size, 25);
        assert_eq!(state.page.page, 0);

        state.smaller_page_size();
        state.smaller_page_size();
        state.smaller_page_size();
        assert_eq!(state.page.page_size, 5);

        for _ in 0..10 {
            state.larger_page_size();
        }
        assert_eq!(state.page.page_size, 251);
    }

    #[test]
    fn test_export_ignores_pagination() {
        let mut state = ready_state(many(30), 5);
        state.selected_column = Column::Currency;
        type_text(&mut state, "eur");
        state.next_page();

        match state.prepare_export() {
            Some(ExportCommand::WriteSpreadsheet { rows, path, .. }) => {
                assert_eq!(rows.len(), 15);
                assert_eq!(rows.len(), state.filtered_count());
                assert!(path.ends_with("Countries.xlsx"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(state.to_render_state().is_exporting);

        state.handle_export_response(ExportResponse::Saved {
            id: 2,
            path: state.config.export_path(),
            rows: 15,
        });
        assert!(!state.to_render_state().is_exporting);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Exported 15 rows"));
    }

    #[test]
    fn test_export_before_data() {
        let mut state = AppState::default();
        state.start_fetch();
        assert!(state.prepare_export().is_none());
        assert_eq!(state.status_message.as_deref(), Some("Nothing to export yet"));
    }

    #[test]
    fn test_editing_multibyte_filter() {
        let mut state = ready_state(vec![Country::new("Togo").with_capital("Lomé")], 5);
        state.selected_column = Column::Capital;
        type_text(&mut state, "lomé");
        assert_eq!(state.filtered_count(), 1);

        state.start_editing();
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.filters.get(Column::Capital), "loé");
        assert_eq!(state.filtered_count(), 0);

        state.clear_filters();
        assert_eq!(state.filtered_count(), 1);
    }
}
