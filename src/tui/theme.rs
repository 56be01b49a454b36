use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};

use crate::config::ViewConfig;

/// Styles and sizes of the tree view, fixed for the lifetime of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub border: Style,
    pub header: Style,
    pub selected: Style,
    pub negative: Style,
    pub positive: Style,
    pub help: Style,
    pub widths: [Constraint; 5],
    pub table_height: u16,
}

impl Theme {
    pub fn from_config(config: &ViewConfig) -> Self {
        let colors = &config.colors;
        Self {
            border: Style::default().fg(Color::Indexed(colors.border)),
            header: Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Indexed(colors.border)),
            selected: Style::default()
                .fg(Color::Indexed(colors.selected_foreground))
                .bg(Color::Indexed(colors.selected_background)),
            negative: Style::default().fg(Color::Indexed(colors.negative)),
            positive: Style::default().fg(Color::Indexed(colors.positive)),
            help: Style::default().fg(Color::Indexed(colors.border)),
            widths: config.column_widths.as_array().map(Constraint::Length),
            table_height: config.table_height,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}
