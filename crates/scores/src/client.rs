//! Score gateway - HTTP client for the score service.
//!
//! Gameplay never depends on the service: the plain calls log the failure and
//! return an empty list, which the UI shows as "unknown" rather than "nobody
//! has scored". The `try_` variants keep the error for flows that need to tell
//! the player (a failed submission offers a retry).

use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::protocol::{HighScoreEntry, ScoreSubmission, ScoresResponse, SubmitResponse};

/// Gateway configuration
///
/// - `PENTRIS_SCORE_URL`: endpoint (default "http://127.0.0.1:7780/scores")
/// - `PENTRIS_SCORE_TIMEOUT_MS`: per-request timeout (default 3000)
/// - `PENTRIS_SCORES_DISABLED`: "1"/"true" turns the leaderboard off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub url: String,
    pub timeout_ms: u64,
    pub disabled: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7780/scores".to_string(),
            timeout_ms: 3000,
            disabled: false,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let url = get_env("PENTRIS_SCORE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.url);
        let timeout_ms = get_env("PENTRIS_SCORE_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.timeout_ms);
        let disabled = get_env("PENTRIS_SCORES_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            url,
            timeout_ms,
            disabled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreGateway {
    uri: Uri,
    timeout: Duration,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl ScoreGateway {
    /// Create a gateway; must be called within a tokio runtime.
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let uri: Uri = config
            .url
            .parse()
            .with_context(|| format!("invalid score service url {:?}", config.url))?;
        if uri.scheme_str() != Some("http") {
            bail!("score service url must be http://, got {:?}", config.url);
        }

        Ok(Self {
            uri,
            timeout: Duration::from_millis(config.timeout_ms),
            client: Client::builder(TokioExecutor::new()).build_http(),
        })
    }

    /// Top scores, or an empty list when the service cannot be reached.
    pub async fn fetch_top_scores(&self) -> Vec<HighScoreEntry> {
        match self.try_fetch_top_scores().await {
            Ok(scores) => scores,
            Err(err) => {
                warn!(error = %err, "leaderboard fetch failed");
                Vec::new()
            }
        }
    }

    /// Submit a score and get the refreshed leaderboard, or an empty list on failure.
    pub async fn submit_score(
        &self,
        name: &str,
        score: u32,
        level: u32,
        lines: u32,
    ) -> Vec<HighScoreEntry> {
        let submission = ScoreSubmission::new(name, score, level, lines);
        match self.try_submit_score(&submission).await {
            Ok(scores) => scores,
            Err(err) => {
                warn!(error = %err, "score submission failed");
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_top_scores(&self) -> anyhow::Result<Vec<HighScoreEntry>> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(self.uri.clone())
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::new()))?;
        let resp: ScoresResponse = self.send_json(req).await?;
        debug!(count = resp.scores.len(), "leaderboard fetched");
        Ok(resp.scores)
    }

    pub async fn try_submit_score(
        &self,
        submission: &ScoreSubmission,
    ) -> anyhow::Result<Vec<HighScoreEntry>> {
        let body = serde_json::to_vec(submission)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.uri.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::from(body)))?;
        let resp: SubmitResponse = self.send_json(req).await?;
        if !resp.success {
            bail!("score service rejected the submission");
        }
        debug!(score = submission.score, "score submitted");
        Ok(resp.scores)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: Request<Full<Bytes>>) -> anyhow::Result<T> {
        tokio::time::timeout(self.timeout, self.exchange(req))
            .await
            .map_err(|_| anyhow!("score service timed out after {:?}", self.timeout))?
    }

    async fn exchange<T: DeserializeOwned>(&self, req: Request<Full<Bytes>>) -> anyhow::Result<T> {
        let resp = self
            .client
            .request(req)
            .await
            .context("score service request failed")?;
        let status = resp.status();
        let bytes = resp.into_body().collect().await?.to_bytes();
        if !status.is_success() {
            bail!("score service answered {status}");
        }
        serde_json::from_slice(&bytes).context("malformed score service response")
    }
}
