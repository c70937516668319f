//! Mapping from terminal events to control requests.

use crate::types::Control;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a control request.
///
/// Only presses count; terminals that report releases would otherwise
/// toggle twice per keystroke.
pub fn handle_key_event(key: KeyEvent) -> Option<Control> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Control::Toggle),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Control::Restart),
        _ => None,
    }
}

/// Map any terminal event to a control request.
pub fn map_event(event: &Event) -> Option<Control> {
    match event {
        Event::Key(key) => handle_key_event(*key),
        Event::Resize(width, height) => Some(Control::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
