//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Column selection
    NextColumn,
    PrevColumn,

    // Filter editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    ClearFilters,

    // Sorting
    SortSelected,

    // Pagination
    NextPage,
    PrevPage,
    LargerPageSize,
    SmallerPageSize,

    // Export
    Export,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Left | KeyCode::BackTab => Some(UiEvent::PrevColumn),
            KeyCode::Right | KeyCode::Tab => Some(UiEvent::NextColumn),
            KeyCode::Char('e') | KeyCode::Char('/') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('s') => Some(UiEvent::SortSelected),
            KeyCode::Char('n') | KeyCode::PageDown => Some(UiEvent::NextPage),
            KeyCode::Char('p') | KeyCode::PageUp => Some(UiEvent::PrevPage),
            KeyCode::Char(']') => Some(UiEvent::LargerPageSize),
            KeyCode::Char('[') => Some(UiEvent::SmallerPageSize),
            KeyCode::Char('c') => Some(UiEvent::ClearFilters),
            KeyCode::Char('x') => Some(UiEvent::Export),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        let map = |code| key_to_ui_event(press(code), InputMode::Normal, false);
        assert_eq!(map(KeyCode::Char('q')), Some(UiEvent::Quit));
        assert_eq!(map(KeyCode::Char('s')), Some(UiEvent::SortSelected));
        assert_eq!(map(KeyCode::Char('x')), Some(UiEvent::Export));
        assert_eq!(map(KeyCode::PageDown), Some(UiEvent::NextPage));
        assert_eq!(map(KeyCode::Char(']')), Some(UiEvent::LargerPageSize));
        assert_eq!(map(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_editing_mode_captures_chars() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), InputMode::Editing, false);
        assert_eq!(event, Some(UiEvent::CharInput('q')));

        let event = key_to_ui_event(press(KeyCode::Esc), InputMode::Editing, false);
        assert_eq!(event, Some(UiEvent::StopEditing));
    }

    #[test]
    fn test_help_swallows_keys() {
        let event = key_to_ui_event(press(KeyCode::Char('x')), InputMode::Normal, true);
        assert_eq!(event, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, InputMode::Editing, false), Some(UiEvent::Quit));
    }
}
