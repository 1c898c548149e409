//! Keyboard and touch mapping, checked against the game's phase gating

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use pentris::core::GameState;
use pentris::input::{handle_key_event, handle_name_key, should_quit, touch_action, NameEdit};
use pentris::types::{GameAction, Phase, TouchButton};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

#[test]
fn test_keyboard_layout() {
    let cases = [
        (KeyCode::Left, GameAction::MoveLeft),
        (KeyCode::Right, GameAction::MoveRight),
        (KeyCode::Down, GameAction::SoftDrop),
        (KeyCode::Up, GameAction::Rotate),
        (KeyCode::Char(' '), GameAction::HardDrop),
        (KeyCode::Char('p'), GameAction::TogglePause),
        (KeyCode::Char('P'), GameAction::TogglePause),
        (KeyCode::Char('r'), GameAction::Restart),
        (KeyCode::Enter, GameAction::Restart),
    ];
    for (code, action) in cases {
        assert_eq!(handle_key_event(key(code)), Some(action), "{:?}", code);
    }
    assert_eq!(handle_key_event(key(KeyCode::Char('x'))), None);
    assert_eq!(handle_key_event(key(KeyCode::Tab)), None);
}

#[test]
fn test_touch_buttons_match_keys() {
    assert_eq!(touch_action(TouchButton::Left), GameAction::MoveLeft);
    assert_eq!(touch_action(TouchButton::Right), GameAction::MoveRight);
    assert_eq!(touch_action(TouchButton::Down), GameAction::SoftDrop);
    assert_eq!(touch_action(TouchButton::Rotate), GameAction::Rotate);
    assert_eq!(touch_action(TouchButton::HardDrop), GameAction::HardDrop);
}

#[test]
fn test_quit_keys() {
    assert!(should_quit(key(KeyCode::Char('q'))));
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!should_quit(key(KeyCode::Char('c'))));
    assert!(!should_quit(key(KeyCode::Esc)));
}

#[test]
fn test_name_prompt_keys() {
    assert_eq!(handle_name_key(key(KeyCode::Char('q'))), Some(NameEdit::Insert('q')));
    assert_eq!(handle_name_key(key(KeyCode::Enter)), Some(NameEdit::Submit));
    assert_eq!(handle_name_key(key(KeyCode::Esc)), Some(NameEdit::Cancel));
    assert_eq!(handle_name_key(key(KeyCode::Backspace)), Some(NameEdit::Backspace));
    assert_eq!(
        handle_name_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        None
    );
}

#[test]
fn test_enter_starts_game_through_mapping() {
    let mut state = GameState::new(10);
    let action = handle_key_event(key(KeyCode::Enter)).unwrap();
    assert!(state.apply_action(action));
    assert_eq!(state.phase(), Phase::Playing);

    // Space during play hard-drops without locking.
    let y0 = state.active().unwrap().y;
    state.apply_action(handle_key_event(key(KeyCode::Char(' '))).unwrap());
    assert!(state.active().unwrap().y > y0);
}
