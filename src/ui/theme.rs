//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the viewer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Title bar across the top of the screen.
    pub header: Style,
    /// Emphasized text inside the title bar.
    pub header_emphasis: Style,
    /// Column titles of the ticket table.
    pub column_header: Style,
    /// Ordinary table cells.
    pub column: Style,
    /// The highlighted row.
    pub selected: Style,
    /// Status bar text.
    pub status: Style,
    /// Error messages in the status bar.
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            header_emphasis: Style::default()
                .fg(Color::Blue)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            column_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            column: Style::default().fg(Color::Gray),
            selected: Style::default()
                .fg(Color::Blue)
                .bg(Color::Gray)
                .add_modifier(Modifier::UNDERLINED),
            status: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
        }
    }
}
