//! Key binding definitions.
//!
//! Resolves raw key events into the tokens the ticket list understands:
//! `up`, `down`, `page up`, `page down`, `space` and `enter`. Anything else
//! is [`ListKey::Other`] and produces no movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key token recognized by the ticket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Space,
    Enter,
    /// Any other key; passed through with no movement.
    Other,
}

impl ListKey {
    /// The token's name as shown in help text and logs.
    pub fn token(&self) -> &'static str {
        match self {
            ListKey::Up => "up",
            ListKey::Down => "down",
            ListKey::PageUp => "page up",
            ListKey::PageDown => "page down",
            ListKey::Space => "space",
            ListKey::Enter => "enter",
            ListKey::Other => "other",
        }
    }

    /// Whether this key opens the highlighted ticket.
    pub fn is_open(&self) -> bool {
        matches!(self, ListKey::Space | ListKey::Enter)
    }
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Whether vim-style `j`/`k` movement is enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Resolve a key event into a list token.
    pub fn resolve(&self, key: &KeyEvent) -> ListKey {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return ListKey::Other;
        }
        match key.code {
            KeyCode::Up => ListKey::Up,
            KeyCode::Down => ListKey::Down,
            KeyCode::PageUp => ListKey::PageUp,
            KeyCode::PageDown => ListKey::PageDown,
            KeyCode::Char(' ') => ListKey::Space,
            KeyCode::Enter => ListKey::Enter,
            KeyCode::Char('k') if self.vim_mode => ListKey::Up,
            KeyCode::Char('j') if self.vim_mode => ListKey::Down,
            _ => ListKey::Other,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_resolve_recognized_tokens() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(&press(KeyCode::Up)), ListKey::Up);
        assert_eq!(bindings.resolve(&press(KeyCode::Down)), ListKey::Down);
        assert_eq!(bindings.resolve(&press(KeyCode::PageUp)), ListKey::PageUp);
        assert_eq!(bindings.resolve(&press(KeyCode::PageDown)), ListKey::PageDown);
        assert_eq!(bindings.resolve(&press(KeyCode::Char(' '))), ListKey::Space);
        assert_eq!(bindings.resolve(&press(KeyCode::Enter)), ListKey::Enter);
    }

    #[test]
    fn test_resolve_unmapped_keys() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(&press(KeyCode::Char('x'))), ListKey::Other);
        assert_eq!(bindings.resolve(&press(KeyCode::Home)), ListKey::Other);
        assert_eq!(bindings.resolve(&press(KeyCode::Char('j'))), ListKey::Other);
    }

    #[test]
    fn test_vim_mode_bindings() {
        let bindings = KeyBindings::new(true);
        assert_eq!(bindings.resolve(&press(KeyCode::Char('j'))), ListKey::Down);
        assert_eq!(bindings.resolve(&press(KeyCode::Char('k'))), ListKey::Up);
    }

    #[test]
    fn test_modified_keys_are_other() {
        let bindings = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL);
        assert_eq!(bindings.resolve(&key), ListKey::Other);
    }

    #[test]
    fn test_open_keys() {
        assert!(ListKey::Space.is_open());
        assert!(ListKey::Enter.is_open());
        assert!(!ListKey::Down.is_open());
        assert_eq!(ListKey::PageDown.token(), "page down");
    }
}
