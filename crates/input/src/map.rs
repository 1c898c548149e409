//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, TouchButton};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up => Some(GameAction::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),

        // Start / restart
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(GameAction::Restart),

        _ => None,
    }
}

/// Map an on-screen touch button to its action.
pub fn touch_action(button: TouchButton) -> GameAction {
    button.action()
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Editing command for the leaderboard name prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEdit {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
}

/// Map keyboard input while the name prompt has focus.
pub fn handle_name_key(key: KeyEvent) -> Option<NameEdit> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(NameEdit::Submit),
        KeyCode::Esc => Some(NameEdit::Cancel),
        KeyCode::Backspace => Some(NameEdit::Backspace),
        KeyCode::Char(c) if !c.is_control() => Some(NameEdit::Insert(c)),
        _ => None,
    }
}
