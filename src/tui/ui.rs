use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::app::App;
use super::theme::Theme;
use crate::tree::projection::{DisplayRow, COLUMN_TITLES};

const HELP: &str = "↑/k up • ↓/j down • enter expand/collapse • esc focus • q quit";

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    // Borders and header take three lines on top of the rows
    let [table_area, help_area, _] = Layout::vertical([
        Constraint::Length(theme.table_height.saturating_add(3)),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let rows = app
        .session()
        .rows()
        .iter()
        .map(|row| table_row(row, theme));
    let header = Row::new(COLUMN_TITLES).style(theme.header);
    let table = Table::new(rows, theme.widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(app.title()),
        )
        .row_highlight_style(if app.is_focused() {
            theme.selected
        } else {
            Style::default()
        });
    let mut state = TableState::default().with_selected(app.selected());
    frame.render_stateful_widget(table, table_area, &mut state);

    frame.render_widget(Paragraph::new(Line::styled(HELP, theme.help)), help_area);
}

fn table_row<'a>(row: &'a DisplayRow, theme: &Theme) -> Row<'a> {
    let [period, group, category, detail, total] = row.cells();
    let total_style = if total.starts_with('-') {
        theme.negative
    } else {
        theme.positive
    };
    Row::new([
        Cell::from(period),
        Cell::from(group),
        Cell::from(category),
        Cell::from(detail),
        Cell::from(Line::from(total).right_aligned()).style(total_style),
    ])
}
