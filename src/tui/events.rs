use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// User actions from keyboard events. How an action is interpreted depends on
/// the active screen and focus; the mapping itself is fixed.
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Cancel,
    Submit,
    NewChat,
    Refresh,
    LoadMore,
    ToggleFocus,
    MoveUp,
    MoveDown,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit / cancel
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Conversation actions
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::NewChat,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Action::LoadMore,
        (KeyCode::Tab, _) => Action::ToggleFocus,

        // Sidebar navigation
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,

        // Text input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
