//! Title bar and status bar.
//!
//! The title bar shows the application name, the current screen and the key
//! hints. The status bar shows the paging position and the latest message.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::Theme;
use crate::ui::PagingSummary;

/// Application title shown on the left of the title bar.
pub const APP_TITLE: &str = "Zendesk Ticket Viewer";

/// Screen name shown in the middle of the title bar.
pub const SCREEN_TITLE: &str = "Ticket List ";

/// Key hints shown on the right of the title bar.
pub const KEY_HINTS: &str =
    "UP / DOWN / PAGE UP / PAGE DOWN scrolls. SPACE / ENTER selects. F8 exits.";

/// A message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Neutral feedback, such as an opened ticket.
    Info(String),
    /// A failure, drawn in the error style.
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

/// Render the title bar in three equal columns.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let left = Paragraph::new(APP_TITLE)
        .style(theme.header)
        .alignment(Alignment::Left);
    let center = Paragraph::new(Span::styled(SCREEN_TITLE, theme.header_emphasis))
        .style(theme.header)
        .alignment(Alignment::Center);
    let right = Paragraph::new(KEY_HINTS)
        .style(theme.header)
        .alignment(Alignment::Right);

    frame.render_widget(left, chunks[0]);
    frame.render_widget(center, chunks[1]);
    frame.render_widget(right, chunks[2]);
}

/// Build the status line: paging position, then the message if any.
pub fn status_line(summary: &PagingSummary, message: Option<&StatusMessage>, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled(format!(" {} ", summary.text()), theme.status)];

    if let Some(message) = message {
        let style = if message.is_error() {
            theme.error
        } else {
            theme.status
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(message.text().to_string(), style));
    }

    Line::from(spans)
}

/// Render the status bar.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    summary: &PagingSummary,
    message: Option<&StatusMessage>,
    theme: &Theme,
) {
    let paragraph = Paragraph::new(status_line(summary, message, theme));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PagingSummary {
        PagingSummary {
            first: 1,
            last: 4,
            cached: 8,
            exhausted: false,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_status_line_without_message() {
        let line = status_line(&summary(), None, &Theme::default());
        assert_eq!(text(&line), " 1 - 4 of 8+ ");
    }

    #[test]
    fn test_status_line_with_error() {
        let theme = Theme::default();
        let message = StatusMessage::Error("Connection failed".to_string());
        let line = status_line(&summary(), Some(&message), &theme);

        assert!(text(&line).ends_with("Connection failed"));
        assert_eq!(line.spans.last().unwrap().style, theme.error);
    }

    #[test]
    fn test_status_message_accessors() {
        let info = StatusMessage::Info("Ticket #5".to_string());
        assert_eq!(info.text(), "Ticket #5");
        assert!(!info.is_error());
        assert!(StatusMessage::Error(String::new()).is_error());
    }
}
