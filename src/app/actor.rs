//! App actor - message loop processing UI events, query results and export results

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{ExportCommand, ExportResponse, NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and layer responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    export_tx: mpsc::UnboundedSender<ExportCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        export_tx: mpsc::UnboundedSender<ExportCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            export_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
        mut export_rx: mpsc::UnboundedReceiver<ExportResponse>,
    ) {
        // The one query of this session
        if let Some(cmd) = self.state.start_fetch() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        self.shutdown();
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = export_rx.recv() => {
                    self.state.handle_export_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => {
                    self.shutdown();
                    break;
                }
            }
        }
    }

    /// Tear down: abandon the pending fetch so nothing arrives after the view is gone
    fn shutdown(&mut self) {
        if let Some(cmd) = self.state.cancel_fetch() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.network_tx.send(NetworkCommand::Shutdown);
        let _ = self.export_tx.send(ExportCommand::Shutdown);
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Column selection
            UiEvent::NextColumn => self.state.next_column(),
            UiEvent::PrevColumn => self.state.prev_column(),

            // Filter editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::ClearFilters => self.state.clear_filters(),

            // Sorting
            UiEvent::SortSelected => self.state.sort_selected(),

            // Pagination
            UiEvent::NextPage => self.state.next_page(),
            UiEvent::PrevPage => self.state.prev_page(),
            UiEvent::LargerPageSize => self.state.larger_page_size(),
            UiEvent::SmallerPageSize => self.state.smaller_page_size(),

            // Export
            UiEvent::Export => {
                if let Some(cmd) = self.state.prepare_export() {
                    let _ = self.export_tx.send(cmd);
                }
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
