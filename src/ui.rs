use ratatui::{prelude::*, widgets::*};

use crate::messages::ui_events::InputMode;
use crate::models::{Column, Country, FilterState, SortState};
use crate::table::TableView;

/// Relative column widths for the country table
pub const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(24),
    Constraint::Percentage(16),
    Constraint::Percentage(10),
    Constraint::Percentage(28),
    Constraint::Percentage(22),
];

/// Renders a one-line filter input for a column
pub fn render_filter_input<'a>(
    column: Column,
    filters: &'a FilterState,
    is_selected: bool,
    input_mode: InputMode,
) -> Paragraph<'a> {
    let border_style = if is_selected && input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = filters.get(column);
    let content = if text.is_empty() && !(is_selected && input_mode == InputMode::Editing) {
        Line::from(Span::styled("filter...", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(text)
    };

    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", column.as_str())),
    )
}

/// Arrow shown next to the sorted column's title
pub fn sort_indicator(sort: &SortState, column: Column) -> &'static str {
    if sort.column == column {
        sort.direction.arrow()
    } else {
        ""
    }
}

/// Header row with sort arrows and the selected column highlighted
pub fn render_header(sort: &SortState, selected: Column) -> Row<'static> {
    let cells = Column::ALL.into_iter().map(|column| {
        let title = format!("{} {}", column.as_str(), sort_indicator(sort, column));
        let style = if column == selected {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Cyan).bold()
        };
        Cell::from(title).style(style)
    });
    Row::new(cells).bottom_margin(1)
}

/// One table row; the emoji flag is shown in front of the name
pub fn render_country_row(country: &Country) -> Row<'static> {
    let name = if country.emoji.is_empty() {
        country.name.clone()
    } else {
        format!("{} {}", country.emoji, country.name)
    };
    Row::new(vec![
        Cell::from(name),
        Cell::from(country.capital.clone().unwrap_or_default()),
        Cell::from(country.currency.clone().unwrap_or_default()),
        Cell::from(country.language_names()),
        Cell::from(country.native.clone()),
    ])
}

/// All rows for the current page, padded with blank rows to a full page
pub fn render_rows(view: &TableView) -> Vec<Row<'static>> {
    let mut rows: Vec<Row> = view.rows.iter().map(render_country_row).collect();
    rows.extend((0..view.empty_rows).map(|_| Row::new(vec![Cell::from(""); 5])));
    rows
}

/// "from-to of count" label for the pagination footer
pub fn pagination_label(view: &TableView, page_size: usize) -> String {
    if view.filtered_count == 0 {
        return String::from("0-0 of 0");
    }
    let from = view.page * page_size + 1;
    let to = (from + view.rows.len()).saturating_sub(1);
    format!("{}-{} of {}", from, to, view.filtered_count)
}
