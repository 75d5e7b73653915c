//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: events flow
//! through [`App::update`], which mutates state, and [`App::view`] draws the
//! rows produced by the last update. Drawing never moves the window.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::api::types::Ticket;
use crate::config::Settings;
use crate::error::AppError;
use crate::events::Event;
use crate::source::RecordSource;
use crate::ui::components::{render_header, render_status_bar, StatusMessage};
use crate::ui::{ListAction, ListView, Theme};

/// Rows taken by the title bar.
const HEADER_HEIGHT: u16 = 1;

/// Rows taken by the status bar.
const STATUS_HEIGHT: u16 = 1;

/// The current state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// No rows have been loaded yet.
    #[default]
    Loading,
    /// Displaying the ticket list.
    TicketList,
    /// Application is in the process of exiting.
    Exiting,
}

/// Height available to the ticket list in a terminal of `terminal_height` rows.
pub fn list_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT)
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App<S: RecordSource<Record = Ticket>> {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// The ticket list.
    list: ListView<S>,
    /// Latest message for the status bar.
    status: Option<StatusMessage>,
    /// Colors.
    theme: Theme,
}

impl<S> App<S>
where
    S: RecordSource<Record = Ticket>,
    S::Error: Into<AppError>,
{
    /// Create the application and lay out the list for the terminal height.
    pub fn new(source: S, settings: &Settings, terminal_height: u16) -> Self {
        let mut app = Self {
            state: AppState::Loading,
            should_quit: false,
            list: ListView::new(source, settings),
            status: None,
            theme: Theme::default(),
        };
        app.resize(terminal_height);
        app
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    #[cfg(test)]
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The ticket list.
    #[cfg(test)]
    pub fn list(&self) -> &ListView<S> {
        &self.list
    }

    /// The current status bar message.
    #[cfg(test)]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
                self.resize(height);
            }
            // Tickets arrive through the cache on demand; nothing to poll.
            Event::Tick => {}
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if is_quit_key(&key_event) {
            self.quit();
            return;
        }

        match self.list.handle_input(key_event) {
            Ok(Some(ListAction::Open(id))) => self.open_ticket(id),
            Ok(None) => {}
            Err(e) => self.handle_error(&e.into()),
        }
    }

    /// Reflow the list for a new terminal height.
    fn resize(&mut self, terminal_height: u16) {
        self.reflow_list(list_height(terminal_height));
    }

    /// Leaves `Loading` once a ticket is cached, the source is exhausted
    /// or fetching failed.
    fn reflow_list(&mut self, height: u16) {
        let failed = match self.list.resize(height) {
            Ok(()) => false,
            Err(e) => {
                self.handle_error(&e.into());
                true
            }
        };

        let cache = self.list.cache();
        if self.state == AppState::Loading && (failed || !cache.is_empty() || cache.is_exhausted())
        {
            self.state = AppState::TicketList;
        }
    }

    /// Act on an opened ticket.
    ///
    /// Ticket details are not shown; the selection is logged and echoed in
    /// the status bar.
    fn open_ticket(&mut self, id: u64) {
        debug!(ticket_id = id, "Actioning ticket");
        self.status = Some(StatusMessage::Info(format!("Ticket #{} selected", id)));
    }

    /// Show an error in the status bar.
    ///
    /// Records cached before the failure stay on screen.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            warn!(error = %error, "Critical error occurred");
        } else {
            debug!(error = %error, "Recoverable error occurred");
        }

        let mut message = error.user_message();
        if let Some(action) = error.suggested_action() {
            message.push(' ');
            message.push_str(action);
        }
        self.status = Some(StatusMessage::Error(message));
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(frame.area());

        render_header(frame, chunks[0], &self.theme);
        if self.state == AppState::Loading {
            let loading = Paragraph::new("Loading tickets...")
                .style(self.theme.status)
                .alignment(Alignment::Center);
            frame.render_widget(loading, chunks[1]);
        } else {
            self.list.render(frame, chunks[1], &self.theme);
        }
        render_status_bar(
            frame,
            chunks[2],
            &self.list.paging_summary(),
            self.status.as_ref(),
            &self.theme,
        );
    }
}

/// F8, `q` and Ctrl+C quit.
fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::F(8) => true,
        KeyCode::Char('q') => !key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
