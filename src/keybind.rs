//! Key bindings for interactive mode.
//!
//! Maps crossterm KeyEvents to stepper actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::terminal::RESIZE_KEY;

/// An action resulting from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Advance the LPS computation.
    StepLps,
    /// Advance the search.
    StepSearch,
    /// Advance whichever phase is current.
    Step,
    /// Start over with the same pattern and text.
    Reset,
    /// Scroll the status log towards older lines.
    ScrollUp,
    /// Scroll the status log towards newer lines.
    ScrollDown,
    PageUp,
    PageDown,
    Quit,
    /// Terminal was resized.
    Resize,
    /// No action (ignore the key).
    Ignore,
}

/// Resolve a KeyEvent to a KeyAction.
pub fn resolve_key(key: KeyEvent) -> KeyAction {
    if key.code == RESIZE_KEY && key.modifiers == KeyModifiers::NONE {
        return KeyAction::Resize;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::StepLps,
        KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::StepSearch,
        KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Enter => KeyAction::Step,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        _ => KeyAction::Ignore,
    }
}
