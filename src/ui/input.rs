//! Keyboard input handling with vim-style navigation support.

use crate::domain::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Standard navigation mode
    #[default]
    Normal,
    /// Keys go to a text field
    Insert,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    Home,
    End,

    // Pages
    Navigate(Route),
    NextPage,
    PreviousPage,

    // Selection
    Select,
    Back,

    // Workflow
    NewProject,
    ToggleFilter,
    FocusFilters,
    ClearFilters,
    Compose,

    // Misc
    Help,
    Quit,
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            vim_navigation: true,
        }
    }
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            // Arrow keys always work
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Home => Some(Action::Home),
            KeyCode::End => Some(Action::End),

            KeyCode::Char('j') if self.bindings.vim_navigation => Some(Action::MoveDown),
            KeyCode::Char('k') if self.bindings.vim_navigation => Some(Action::MoveUp),
            KeyCode::Char('h') if self.bindings.vim_navigation => Some(Action::MoveLeft),
            KeyCode::Char('l') if self.bindings.vim_navigation => Some(Action::MoveRight),
            KeyCode::Char('g') if self.bindings.vim_navigation => Some(Action::Home),
            KeyCode::Char('G') if self.bindings.vim_navigation => Some(Action::End),

            KeyCode::Char(c @ '1'..='9') => Route::from_shortcut(c).map(Action::Navigate),
            KeyCode::Tab => Some(Action::NextPage),
            KeyCode::BackTab => Some(Action::PreviousPage),

            KeyCode::Enter => Some(Action::Select),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char(' ') => Some(Action::ToggleFilter),

            KeyCode::Char('n') => Some(Action::NewProject),
            KeyCode::Char('f') => Some(Action::FocusFilters),
            KeyCode::Char('x') => Some(Action::ClearFilters),
            KeyCode::Char('i') | KeyCode::Char('/') => Some(Action::Compose),

            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Char('q') => Some(Action::Quit),

            _ => None,
        }
    }

    /// Only leaving insert mode is mapped; the focused field gets the rest
    fn handle_insert_key(&self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Esc {
            return Some(Action::Back);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Back);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_navigation() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('j')), InputMode::Normal),
            Some(Action::MoveDown)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('k')), InputMode::Normal),
            Some(Action::MoveUp)
        );
    }

    #[test]
    fn test_vim_disabled_keeps_arrows() {
        let handler = InputHandler::new(false);
        assert_eq!(handler.handle_key(key(KeyCode::Char('j')), InputMode::Normal), None);
        assert_eq!(
            handler.handle_key(key(KeyCode::Down), InputMode::Normal),
            Some(Action::MoveDown)
        );
    }

    #[test]
    fn test_number_keys_navigate() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('3')), InputMode::Normal),
            Some(Action::Navigate(Route::Manufacturers))
        );
        assert_eq!(handler.handle_key(key(KeyCode::Char('9')), InputMode::Normal), None);
    }

    #[test]
    fn test_insert_mode_passes_text_through() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key(key(KeyCode::Char('q')), InputMode::Insert), None);
        assert_eq!(
            handler.handle_key(key(KeyCode::Esc), InputMode::Insert),
            Some(Action::Back)
        );
    }
}
