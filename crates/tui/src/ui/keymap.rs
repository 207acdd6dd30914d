use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    NextField,
    PrevField,
    SwitchKind,
    Reload,
    Submit,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('l') => AppAction::SwitchKind,
            KeyCode::Char('r') => AppAction::Reload,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Quit,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::PageUp => AppAction::PageUp,
        KeyCode::PageDown => AppAction::PageDown,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
