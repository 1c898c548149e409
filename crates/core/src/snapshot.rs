//! Read-only view of a game for renderers.

use crate::pieces::ActivePiece;
use crate::types::{Cell, Phase, BOARD_HEIGHT, BOARD_WIDTH};

/// Locked cells, row-major
pub type CellGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: CellGrid,
    pub active: Option<ActivePiece>,
    pub ghost_y: Option<i8>,
    pub phase: Phase,
    pub session_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_ms: u32,
    pub reward_unlocked: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            phase: Phase::NotStarted,
            session_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            gravity_ms: 0,
            reward_unlocked: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;

    #[test]
    fn snapshot_mirrors_state() {
        let mut state = GameState::new(5);
        state.start();
        let snap = state.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.active, state.active());
        assert_eq!(snap.ghost_y, state.ghost_y());
        assert_eq!(snap.gravity_ms, 500);
    }
}
