//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, scoring and
//! the reward hook. It is the single serialized state machine of a session: key
//! input ([`GameState::apply_action`]) and the gravity timer ([`GameState::tick`])
//! both funnel into the same `&mut self` methods, so a move can never interleave
//! with a gravity step.
//!
//! Lifecycle: `NotStarted -> Playing <-> Paused -> GameOver -> (restart) -> Playing`.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::pieces::{instantiate, random_piece, ActivePiece};
use crate::reward::{RewardEvent, RewardTracker};
use crate::scoring::{calculate_score, gravity_interval_ms, LevelRule};
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::{Board, SimpleRng};

/// Result of trying to move the active piece one row down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row
    Moved,
    /// The piece could not move, was merged, and the next piece spawned
    Locked { lines_cleared: u32 },
    /// The piece locked and the next spawn collided
    GameOver,
    /// Nothing happened (no active piece, or the session is not playing)
    Ignored,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    phase: Phase,
    level_rule: LevelRule,
    /// Monotonic session id (increments on every start/restart).
    session_id: u32,
    /// Number of pieces spawned in the current session.
    piece_count: u32,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    reward: RewardTracker,
    pending_reward: Option<RewardEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and default configuration
    pub fn new(seed: u32) -> Self {
        Self::with_config(&GameConfig::default(), seed)
    }

    pub fn with_config(config: &GameConfig, seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            rng: SimpleRng::new(seed),
            phase: Phase::NotStarted,
            level_rule: config.level_rule,
            session_id: 0,
            piece_count: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_timer_ms: 0,
            reward: RewardTracker::new(config.reward_threshold, config.coupon_code.clone()),
            pending_reward: None,
        }
    }

    /// Start the first session and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.begin_session();
    }

    /// Throw away the current session and start a fresh one
    pub fn restart(&mut self) {
        self.begin_session();
    }

    fn begin_session(&mut self) {
        self.board.clear();
        self.active = None;
        self.session_id = self.session_id.wrapping_add(1);
        self.piece_count = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_timer_ms = 0;
        self.reward.reset();
        self.pending_reward = None;
        self.phase = Phase::Playing;
        info!(session = self.session_id, "session started");
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level_rule(&self) -> LevelRule {
        self.level_rule
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions (puzzles, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current gravity interval
    pub fn gravity_interval_ms(&self) -> u32 {
        gravity_interval_ms(self.level)
    }

    /// Time accumulated toward the next gravity step
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Take the coupon unlock, if one fired since the last call.
    pub fn take_reward(&mut self) -> Option<RewardEvent> {
        self.pending_reward.take()
    }

    pub fn reward_unlocked(&self) -> bool {
        self.reward.fired()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in self.board.rows().enumerate() {
            out.board[y].copy_from_slice(row);
        }
        out.active = self.active;
        out.ghost_y = self.ghost_y();
        out.phase = self.phase;
        out.session_id = self.session_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.gravity_ms = self.gravity_interval_ms();
        out.reward_unlocked = self.reward.fired();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a random piece. A collision at the spawn position ends the session.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = random_piece(&mut self.rng);
        self.place_spawned(piece)
    }

    /// Spawn a specific catalog shape (with random glyphs).
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        let piece = instantiate(kind, &mut self.rng);
        self.place_spawned(piece)
    }

    fn place_spawned(&mut self, piece: ActivePiece) -> bool {
        if self.board.collides(&piece.matrix, piece.x, piece.y) {
            self.active = None;
            self.phase = Phase::GameOver;
            info!(
                session = self.session_id,
                score = self.score,
                level = self.level,
                lines = self.lines,
                "game over"
            );
            return false;
        }

        self.active = Some(piece);
        self.piece_count = self.piece_count.wrapping_add(1);
        true
    }

    /// Shift the active piece one column; illegal moves are silently rejected.
    pub fn move_horizontal(&mut self, dir: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let x = active.x + dir;
        if self.board.collides(&active.matrix, x, active.y) {
            return false;
        }

        self.active = Some(ActivePiece { x, ..active });
        true
    }

    /// Rotate clockwise in place. No kicks: a blocked rotation is rejected.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let matrix = active.matrix.rotated_cw();
        if self.board.collides(&matrix, active.x, active.y) {
            return false;
        }

        self.active = Some(ActivePiece { matrix, ..active });
        true
    }

    /// Move down one row, or lock the piece if it cannot descend.
    ///
    /// This is shared by the manual soft drop and the gravity timer.
    pub fn soft_drop(&mut self) -> DropOutcome {
        let Some(active) = self.active else {
            return DropOutcome::Ignored;
        };

        let y = active.y + 1;
        if !self.board.collides(&active.matrix, active.x, y) {
            self.active = Some(ActivePiece { y, ..active });
            return DropOutcome::Moved;
        }

        self.lock_piece()
    }

    /// Lowest legal row for the active piece's origin
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while !self.board.collides(&active.matrix, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Reposition the piece at its lowest legal row without locking it.
    ///
    /// Locking happens on the next gravity step or soft drop. Returns the number
    /// of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        let (Some(active), Some(y)) = (self.active, self.ghost_y()) else {
            return 0;
        };

        self.active = Some(ActivePiece { y, ..active });
        (y - active.y) as u32
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece.
    pub fn lock_piece(&mut self) -> DropOutcome {
        let Some(active) = self.active.take() else {
            return DropOutcome::Ignored;
        };

        self.board.merge(&active.matrix, active.x, active.y);
        let lines_cleared = self.board.clear_completed_lines();

        let previous_level = self.level;
        let result = calculate_score(self.score, self.level, lines_cleared, self.level_rule);
        self.score = result.score;
        self.level = result.level;
        self.lines += lines_cleared;

        if result.level_changed(previous_level) {
            // Re-arm the gravity timer at the new interval.
            self.drop_timer_ms = 0;
            debug!(
                level = self.level,
                interval_ms = self.gravity_interval_ms(),
                "level changed"
            );
        }
        if lines_cleared > 0 {
            debug!(lines_cleared, points = result.points, score = self.score, "lines cleared");
        }

        if let Some(event) = self.reward.observe(self.score) {
            self.pending_reward = Some(event);
        }

        if self.spawn_piece() {
            DropOutcome::Locked { lines_cleared }
        } else {
            DropOutcome::GameOver
        }
    }

    /// One firing of the gravity timer.
    pub fn gravity_tick(&mut self) -> DropOutcome {
        if self.phase != Phase::Playing {
            return DropOutcome::Ignored;
        }
        self.soft_drop()
    }

    /// Advance the gravity timer; returns true when a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.gravity_interval_ms() {
            return false;
        }

        self.drop_timer_ms = 0;
        self.gravity_tick();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                true
            }
            Phase::NotStarted | Phase::GameOver => false,
        }
    }

    /// Apply a game action, honoring the gating of the current phase.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.phase {
            Phase::NotStarted => {
                if action == GameAction::Restart {
                    self.start();
                    return true;
                }
                false
            }
            Phase::Paused => action == GameAction::TogglePause && self.toggle_pause(),
            Phase::GameOver => {
                if action == GameAction::Restart {
                    self.restart();
                    return true;
                }
                false
            }
            Phase::Playing => match action {
                GameAction::MoveLeft => self.move_horizontal(-1),
                GameAction::MoveRight => self.move_horizontal(1),
                GameAction::SoftDrop => self.soft_drop() != DropOutcome::Ignored,
                GameAction::HardDrop => {
                    self.hard_drop();
                    true
                }
                GameAction::Rotate => self.rotate(),
                GameAction::TogglePause => self.toggle_pause(),
                GameAction::Restart => {
                    self.restart();
                    true
                }
            },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
