//! Event handling for the application.
//!
//! This module polls terminal input and resolves key presses into the
//! list's key tokens.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{KeyBindings, ListKey};

/// Events processed by the application, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized to `(width, height)`.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
}
