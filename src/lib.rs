//! Pentris (workspace facade crate).
//!
//! A falling-block game played with the twelve pentominoes on a 16x22 board.
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `pentris::{core,input,scores,term,types}` and adds the
//! terminal front-end state in [`app`].

pub mod app;

pub use pentris_core as core;
pub use pentris_input as input;
pub use pentris_scores as scores;
pub use pentris_term as term;
pub use pentris_types as types;
