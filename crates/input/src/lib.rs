//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events and on-screen touch buttons into
//! [`crate::types::GameAction`], and keys into name-prompt edits. Whether an
//! action is accepted in the current phase is decided by the game state.

pub mod map;

pub use pentris_types as types;

pub use map::{handle_key_event, handle_name_key, should_quit, touch_action, NameEdit};
