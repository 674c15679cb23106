//! Countries TUI - browse, sort, filter and export the country list
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - the GraphQL countries query
//! - Export Layer (Tokio blocking pool) - xlsx writing

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use countries_tui::messages::{ExportCommand, ExportResponse, NetworkCommand, NetworkResponse, RenderState, UiEvent};
use countries_tui::messages::render::QueryStatus;
use countries_tui::messages::ui_events::{key_to_ui_event, InputMode};
use countries_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME, PAGE_SIZES};
use countries_tui::{ui, AppActor, Column, Config, ExportActor, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    tracing::info!(endpoint = %config.endpoint, page_size = config.page_size, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (export_cmd_tx, export_cmd_rx) = mpsc::unbounded_channel::<ExportCommand>();
    let (export_resp_tx, export_resp_rx) = mpsc::unbounded_channel::<ExportResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(net_resp_tx, config.timeout_secs);
    let network_handle = tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn export actor
    let export_actor = ExportActor::new(export_resp_tx);
    let export_handle = tokio::spawn(export_actor.run(export_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(config, net_cmd_tx, export_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx, export_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    // Wait for the actors so a running export finishes and nothing outlives the view
    let _ = app_handle.await;
    let _ = network_handle.await;
    let _ = export_handle.await;
    tracing::info!("Exited");

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.input_mode, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Length(3),  // Filter inputs
            Constraint::Min(0),     // Table
            Constraint::Length(1),  // Pagination
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);
    draw_filters(f, state, main_chunks[1]);

    match &state.status {
        QueryStatus::Loading => draw_loading(f, main_chunks[2]),
        QueryStatus::Error(message) => draw_error(f, message, main_chunks[2]),
        QueryStatus::Ready => draw_table(f, state, main_chunks[2]),
    }

    draw_pagination(f, state, main_chunks[3]);
    draw_status_bar(f, state, main_chunks[4]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} {} ", APP_NAME, APP_VERSION),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}", state.endpoint), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_filters(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(ui::COLUMN_WIDTHS)
        .split(area);

    for column in Column::ALL {
        let is_selected = column == state.selected_column;
        let input = ui::render_filter_input(column, &state.filters, is_selected, state.input_mode);
        f.render_widget(input, chunks[column.index()]);

        if is_selected && state.input_mode == InputMode::Editing {
            let rect = chunks[column.index()];
            let text = state.filters.get(column);
            let offset = text[..state.cursor_position.min(text.len())].chars().count() as u16;
            let max_x = rect.x + rect.width.saturating_sub(2);
            let cursor_x = (rect.x + offset + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, rect.y + 1));
        }
    }
}

fn draw_loading(f: &mut Frame, area: Rect) {
    let loading = Paragraph::new("Loading countries...")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Countries "));
    f.render_widget(loading, area);
}

fn draw_error(f: &mut Frame, message: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(" Error ", Style::default().fg(Color::Red).bold()));

    let alert = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(alert, area);
}

fn draw_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.table.filtered_count == state.table.total_count {
        format!(" Countries ({}) ", state.table.total_count)
    } else {
        format!(" Countries ({} of {}) ", state.table.filtered_count, state.table.total_count)
    };

    let table = Table::new(ui::render_rows(&state.table), ui::COLUMN_WIDTHS)
        .header(ui::render_header(&state.sort, state.selected_column))
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);
    f.render_widget(table, area);
}

fn draw_pagination(f: &mut Frame, state: &RenderState, area: Rect) {
    let sizes: Vec<Span> = PAGE_SIZES
        .iter()
        .map(|size| {
            let style = if *size == state.page.page_size {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", size), style)
        })
        .collect();

    let mut spans = vec![Span::raw(" Rows per page:")];
    spans.extend(sizes);
    spans.push(Span::raw(format!(
        "   {}   page {}/{}",
        ui::pagination_label(&state.table, state.page.page_size),
        state.table.page + 1,
        state.table.page_count.max(1),
    )));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hint = if state.input_mode == InputMode::Editing {
        " ESC/Enter:done | arrows:move "
    } else {
        " ←/→:column | e:filter | s:sort | n/p:page | [/]:size | x:export | ?:help | q:quit "
    };

    let mut text = String::from(hint);
    if state.is_exporting {
        text.push_str("| exporting... ");
    } else if let Some(message) = &state.status_message {
        text.push_str(&format!("| {} ", message));
    } else if state.fetch_time_ms > 0 {
        text.push_str(&format!("| fetched in {}ms ", state.fetch_time_ms));
    }

    let bar = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 COUNTRIES - Keyboard Shortcuts

 TABLE
   ← / → (Tab)        Select column
   s                  Sort by selected column (again to flip)
   n / PageDown       Next page
   p / PageUp         Previous page
   ] / [              Larger / smaller page size

 FILTERS
   e / Enter          Edit filter of selected column
   Esc / Enter        Finish editing
   c                  Clear all filters

 EXPORT
   x                  Write Countries.xlsx (all filtered rows)

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
