//! Front-end state around a [`GameState`].
//!
//! `App` is what the terminal loop drives: it routes keys and pointer presses
//! into the game, owns the end-of-session name prompt, the last known
//! leaderboard and the unlocked coupon, and talks to the score service through
//! an optional [`ScoreRuntime`]. It performs no terminal I/O itself.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info};

use crate::core::{GameConfig, GameSnapshot, GameState};
use crate::input::{handle_key_event, handle_name_key, should_quit, NameEdit};
use crate::scores::{HighScoreEntry, ScoreReply, ScoreRuntime, ScoreSubmission};
use crate::term::{FrameBuffer, GameView, HudView, LeaderRow, PromptView, Viewport};
use crate::types::{GameAction, Phase, MAX_NAME_CHARS};

/// Where the end-of-session submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Session still running (or never started).
    Idle,
    /// Game over; the player is typing a name.
    Editing,
    /// Request in flight.
    Submitting,
    Submitted,
    /// Last attempt failed; Enter retries with the same name.
    Failed,
    /// Player declined, or there is no score service.
    Skipped,
}

pub struct App {
    game: GameState,
    snapshot: GameSnapshot,
    view: GameView,
    viewport: Viewport,
    scores: Option<ScoreRuntime>,
    leaderboard: Vec<LeaderRow>,
    name: String,
    submit: SubmitStatus,
    coupon: Option<String>,
    seen_session: u32,
    quit: bool,
}

impl App {
    pub fn new(config: &GameConfig, seed: u32, scores: Option<ScoreRuntime>) -> Self {
        let game = GameState::with_config(config, seed);
        let seen_session = game.session_id();
        let app = Self {
            snapshot: game.snapshot(),
            game,
            view: GameView::default(),
            viewport: Viewport::new(80, 24),
            scores,
            leaderboard: Vec::new(),
            name: String::new(),
            submit: SubmitStatus::Idle,
            coupon: None,
            seen_session,
            quit: false,
        };
        app.request_leaderboard();
        app
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn leaderboard(&self) -> &[LeaderRow] {
        &self.leaderboard
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn submit_status(&self) -> SubmitStatus {
        self.submit
    }

    pub fn coupon(&self) -> Option<&str> {
        self.coupon.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt_has_focus() {
            match handle_name_key(key) {
                // After a failed submit the name is fixed, so letters fall
                // through to the game keys (R restarts, q quits).
                Some(NameEdit::Insert(_)) if self.submit == SubmitStatus::Failed => {}
                Some(edit) => {
                    self.edit_name(edit);
                    return;
                }
                None => {
                    // Only Ctrl-C leaves while typing.
                    if should_quit(key) {
                        self.quit = true;
                    }
                    return;
                }
            }
        }

        if should_quit(key) {
            self.quit = true;
            return;
        }
        if let Some(action) = handle_key_event(key) {
            self.apply_action(action);
        }
    }

    /// Left presses on the touch pad act like the matching key.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(button) = self.view.touch_hit(self.viewport, mouse.column, mouse.row) {
            self.apply_action(button.action());
        }
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let accepted = self.game.apply_action(action);
        self.sync();
        accepted
    }

    /// Advance the game clock and drain finished score requests.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.game.tick(elapsed_ms);
        self.sync();

        let mut replies = Vec::new();
        if let Some(rt) = self.scores.as_mut() {
            while let Some(reply) = rt.try_recv() {
                replies.push(reply);
            }
        }
        for reply in replies {
            self.handle_reply(reply);
        }
    }

    /// Apply a score service reply, ignoring replies for an older session.
    pub fn handle_reply(&mut self, reply: ScoreReply) -> bool {
        if reply.session_id() != self.game.session_id() {
            debug!(
                reply_session = reply.session_id(),
                session = self.game.session_id(),
                "discarding stale score reply"
            );
            return false;
        }

        match reply {
            ScoreReply::Leaderboard { scores, .. } => {
                self.leaderboard = rows(&scores);
            }
            ScoreReply::Submitted { result, .. } => match result {
                Ok(scores) => {
                    self.submit = SubmitStatus::Submitted;
                    if !scores.is_empty() {
                        self.leaderboard = rows(&scores);
                    }
                }
                Err(_) => self.submit = SubmitStatus::Failed,
            },
        }
        true
    }

    pub fn render_into(&mut self, fb: &mut FrameBuffer) {
        self.game.snapshot_into(&mut self.snapshot);
        let prompt = match self.submit {
            SubmitStatus::Editing => PromptView::Entering { name: &self.name },
            SubmitStatus::Submitting => PromptView::Submitting,
            SubmitStatus::Submitted => PromptView::Submitted,
            SubmitStatus::Failed => PromptView::Failed,
            SubmitStatus::Idle | SubmitStatus::Skipped => PromptView::Hidden,
        };
        let hud = HudView {
            leaderboard: &self.leaderboard,
            coupon: self.coupon.as_deref(),
            prompt,
        };
        self.view.render_into(&self.snapshot, &hud, self.viewport, fb);
    }

    fn prompt_has_focus(&self) -> bool {
        matches!(self.submit, SubmitStatus::Editing | SubmitStatus::Failed)
    }

    fn edit_name(&mut self, edit: NameEdit) {
        match edit {
            NameEdit::Insert(c) => {
                if self.name.chars().count() < MAX_NAME_CHARS {
                    self.name.push(c);
                }
            }
            NameEdit::Backspace => {
                if self.submit == SubmitStatus::Editing {
                    self.name.pop();
                }
            }
            NameEdit::Submit => self.submit_score(),
            NameEdit::Cancel => self.submit = SubmitStatus::Skipped,
        }
    }

    fn submit_score(&mut self) {
        let Some(rt) = self.scores.as_ref() else {
            self.submit = SubmitStatus::Skipped;
            return;
        };
        let submission = ScoreSubmission::new(
            &self.name,
            self.game.score(),
            self.game.level(),
            self.game.lines(),
        );
        info!(score = submission.score, name = %submission.name, "submitting score");
        rt.submit(self.game.session_id(), submission);
        self.submit = SubmitStatus::Submitting;
    }

    fn request_leaderboard(&self) {
        if let Some(rt) = self.scores.as_ref() {
            rt.request_leaderboard(self.game.session_id());
        }
    }

    /// Follow session and phase changes after every game update.
    fn sync(&mut self) {
        if self.game.session_id() != self.seen_session {
            self.seen_session = self.game.session_id();
            self.name.clear();
            self.submit = SubmitStatus::Idle;
            self.coupon = None;
            self.request_leaderboard();
        }

        if let Some(reward) = self.game.take_reward() {
            self.coupon = Some(reward.code);
        }

        if self.game.phase() == Phase::GameOver && self.submit == SubmitStatus::Idle {
            self.submit = if self.scores.is_some() {
                SubmitStatus::Editing
            } else {
                SubmitStatus::Skipped
            };
        }
    }
}

fn rows(scores: &[HighScoreEntry]) -> Vec<LeaderRow> {
    scores
        .iter()
        .map(|e| LeaderRow {
            name: e.name.clone(),
            score: e.score,
        })
        .collect()
}
