//! Score runtime integration.
//!
//! Bridges the sync game loop with the async score gateway. The game loop only
//! ever sends requests and polls replies with [`ScoreRuntime::try_recv`]; it never
//! waits on the network. Every request is tagged with the session it belongs to so
//! the host can discard replies that arrive after that session is gone.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::warn;

use crate::client::{GatewayConfig, ScoreGateway};
use crate::protocol::{HighScoreEntry, ScoreSubmission};

/// Work requested by the game loop.
#[derive(Debug, Clone)]
pub enum ScoreRequest {
    Fetch { session_id: u32 },
    Submit { session_id: u32, submission: ScoreSubmission },
}

/// Result delivered back to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreReply {
    /// Leaderboard refresh; empty when the service was unreachable.
    Leaderboard { session_id: u32, scores: Vec<HighScoreEntry> },
    /// Submission outcome with the refreshed leaderboard, or the failure text.
    Submitted {
        session_id: u32,
        result: Result<Vec<HighScoreEntry>, String>,
    },
}

impl ScoreReply {
    pub fn session_id(&self) -> u32 {
        match self {
            ScoreReply::Leaderboard { session_id, .. } => *session_id,
            ScoreReply::Submitted { session_id, .. } => *session_id,
        }
    }
}

/// Running gateway worker.
pub struct ScoreRuntime {
    _rt: Runtime,
    req_tx: mpsc::UnboundedSender<ScoreRequest>,
    reply_rx: mpsc::UnboundedReceiver<ScoreReply>,
}

impl ScoreRuntime {
    /// Start the worker from environment variables.
    ///
    /// Returns `Ok(None)` if `PENTRIS_SCORES_DISABLED` is set.
    pub fn start_from_env() -> anyhow::Result<Option<Self>> {
        Self::start(&GatewayConfig::from_env())
    }

    pub fn start(config: &GatewayConfig) -> anyhow::Result<Option<Self>> {
        if config.disabled {
            return Ok(None);
        }

        let rt = Runtime::new()?;
        let gateway = {
            let _guard = rt.enter();
            ScoreGateway::new(config)?
        };

        let (req_tx, mut req_rx) = mpsc::unbounded_channel::<ScoreRequest>();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel::<ScoreReply>();

        rt.spawn(async move {
            while let Some(req) = req_rx.recv().await {
                let gateway = gateway.clone();
                let reply_tx = reply_tx.clone();
                // One task per request so a slow submit never delays a refresh.
                tokio::spawn(async move {
                    let reply = serve(&gateway, req).await;
                    // The game loop may already be gone; nothing to do then.
                    let _ = reply_tx.send(reply);
                });
            }
        });

        Ok(Some(Self {
            _rt: rt,
            req_tx,
            reply_rx,
        }))
    }

    pub fn request_leaderboard(&self, session_id: u32) {
        self.send(ScoreRequest::Fetch { session_id });
    }

    pub fn submit(&self, session_id: u32, submission: ScoreSubmission) {
        self.send(ScoreRequest::Submit {
            session_id,
            submission,
        });
    }

    pub fn send(&self, req: ScoreRequest) {
        let _ = self.req_tx.send(req);
    }

    pub fn try_recv(&mut self) -> Option<ScoreReply> {
        self.reply_rx.try_recv().ok()
    }
}

async fn serve(gateway: &ScoreGateway, req: ScoreRequest) -> ScoreReply {
    match req {
        ScoreRequest::Fetch { session_id } => ScoreReply::Leaderboard {
            session_id,
            scores: gateway.fetch_top_scores().await,
        },
        ScoreRequest::Submit {
            session_id,
            submission,
        } => {
            let result = gateway
                .try_submit_score(&submission)
                .await
                .map_err(|err| {
                    warn!(error = %err, score = submission.score, "score submission failed");
                    err.to_string()
                });
            ScoreReply::Submitted { session_id, result }
        }
    }
}
