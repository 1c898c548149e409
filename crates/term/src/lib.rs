//! Terminal renderer for Pentris.
//!
//! Renders into a plain framebuffer (no widget toolkit) that is flushed to the
//! terminal by repainting only the rows that changed since the last frame.
//!
//! - `fb`: styled character cells
//! - `game_view`: pure mapping from a `GameSnapshot` and HUD state to cells,
//!   plus hit-testing for the on-screen touch pad
//! - `renderer`: crossterm output, raw mode and mouse capture

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use pentris_core as core;
pub use pentris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, HudView, Layout, LeaderRow, PromptView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
