//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any environment (terminal, headless, server)
//!
//! # Module Structure
//!
//! - [`board`]: 16x22 board with collision detection, merging and line clearing
//! - [`game_state`]: Session state machine, piece controller, gravity timing
//! - [`pieces`]: The 12-shape catalog, shape matrices and clockwise rotation
//! - [`rng`]: Seedable LCG used for piece and glyph selection
//! - [`scoring`]: Line clear points, level progression and gravity speed
//! - [`reward`]: One-shot coupon unlock when the score crosses a threshold
//! - [`config`]: Environment-driven game configuration
//!
//! # Game Rules
//!
//! - **Uniform draws**: Each spawn picks one of the 12 shapes uniformly
//! - **Plain rotation**: 90° clockwise turn of the bounding box, no wall kicks
//! - **Hard drop**: Moves the piece to its lowest legal row; the lock happens on
//!   the next gravity step or soft drop
//! - **Scoring**: `lines * 10 * level`, level = `score / 50 + 1`
//! - **Game over**: The only loss condition is a spawn that collides
//!
//! # Example
//!
//! ```
//! use pentris_core::GameState;
//! use pentris_core::types::{GameAction, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Restart);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop only places the piece; the next gravity step locks it.
//! assert!(game.board().filled_count() == 0);
//! game.gravity_tick();
//! assert!(game.board().filled_count() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) from the host loop with
//! the elapsed milliseconds; a gravity step runs whenever the accumulated time
//! reaches the level's interval (500ms at level 1, 20ms faster per level, 200ms floor).

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod reward;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use pentris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game_state::{DropOutcome, GameState};
pub use pieces::{random_piece, shape, ActivePiece, ShapeMatrix};
pub use reward::{RewardEvent, RewardTracker};
pub use rng::SimpleRng;
pub use scoring::{calculate_score, gravity_interval_ms, level_for_score, LevelRule, ScoreResult};
pub use snapshot::GameSnapshot;
