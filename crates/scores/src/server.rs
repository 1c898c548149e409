//! HTTP score service
//!
//! A small axum app over a [`ScoreStore`]. The store owns the leaderboard and
//! performs the top-N truncation; handlers only translate JSON.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{extract::State, routing::get, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::protocol::{
    current_timestamp_ms, ScoreSubmission, ScoresResponse, SubmitResponse, LEADERBOARD_CAPACITY,
    LEADERBOARD_DISPLAY,
};
use crate::store::{ScoreStore, SharedStore};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreServerConfig {
    pub host: String,
    pub port: u16,
    pub capacity: usize,
}

impl Default for ScoreServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7780,
            capacity: LEADERBOARD_CAPACITY,
        }
    }
}

impl ScoreServerConfig {
    /// Create from `PENTRIS_SCORE_HOST` / `PENTRIS_SCORE_PORT`
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = get_env("PENTRIS_SCORE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = get_env("PENTRIS_SCORE_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host,
            port,
            capacity: defaults.capacity,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid score service address {}:{}", self.host, self.port))
    }
}

/// Build the service routes over a shared store.
pub fn router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/scores", get(list_scores).post(submit_score))
        .route("/health", get(health))
        .with_state(store)
        .layer(cors)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_scores(State(store): State<SharedStore>) -> Json<ScoresResponse> {
    let scores = {
        let store = store.lock().unwrap_or_else(|e| e.into_inner());
        store.top(LEADERBOARD_DISPLAY)
    };
    Json(ScoresResponse { scores })
}

async fn submit_score(
    State(store): State<SharedStore>,
    Json(submission): Json<ScoreSubmission>,
) -> Json<SubmitResponse> {
    let (entry, rank, scores) = {
        let mut store = store.lock().unwrap_or_else(|e| e.into_inner());
        let entry = store.insert(&submission, current_timestamp_ms());
        let rank = store.rank_of(entry.id);
        (entry, rank, store.top(LEADERBOARD_DISPLAY))
    };
    info!(id = entry.id, name = %entry.name, score = entry.score, ?rank, "score submitted");
    Json(SubmitResponse {
        success: true,
        scores,
    })
}

/// Bind and serve until the task is dropped.
///
/// `ready_tx` receives the bound address (useful with port 0).
pub async fn run_server(
    config: ScoreServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind score service on {addr}"))?;
    let local = listener.local_addr()?;
    info!(%local, capacity = config.capacity, "score service listening");

    if let Some(tx) = ready_tx {
        let _ = tx.send(local);
    }

    let store = ScoreStore::with_capacity(config.capacity).shared();
    axum::serve(listener, router(store)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/scores")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn config_defaults() {
        let cfg = ScoreServerConfig::from_env_with(|_| None);
        assert_eq!(cfg, ScoreServerConfig::default());
        assert_eq!(cfg.socket_addr().unwrap(), "127.0.0.1:7780".parse().unwrap());
    }

    #[test]
    fn config_env_overrides() {
        let cfg = ScoreServerConfig::from_env_with(|k| match k {
            "PENTRIS_SCORE_HOST" => Some("0.0.0.0".to_string()),
            "PENTRIS_SCORE_PORT" => Some("9001".to_string()),
            _ => None,
        });
        assert_eq!(cfg.socket_addr().unwrap(), "0.0.0.0:9001".parse().unwrap());
    }

    #[test]
    fn config_bad_host_is_an_error() {
        let cfg = ScoreServerConfig {
            host: "not a host".to_string(),
            ..ScoreServerConfig::default()
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[tokio::test]
    async fn get_scores_starts_empty() {
        let app = router(ScoreStore::new().shared());
        let resp = app
            .oneshot(Request::get("/scores").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ScoresResponse = body_json(resp).await;
        assert!(body.scores.is_empty());
    }

    #[tokio::test]
    async fn post_then_get_returns_sorted_top_ten() {
        let store = ScoreStore::new().shared();
        for i in 0..12u32 {
            let body = format!(r#"{{"name":"p{i}","score":{},"level":1,"lines":0}}"#, i * 10);
            let resp = router(store.clone()).oneshot(post(&body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let body: SubmitResponse = body_json(resp).await;
            assert!(body.success);
        }

        let resp = router(store.clone())
            .oneshot(Request::get("/scores").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body: ScoresResponse = body_json(resp).await;
        assert_eq!(body.scores.len(), 10);
        assert_eq!(body.scores[0].score, 110);
        assert_eq!(body.scores[9].score, 20);
        assert_eq!(store.lock().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn malformed_submission_is_rejected() {
        let app = router(ScoreStore::new().shared());
        let resp = app.oneshot(post(r#"{"name":"x"}"#)).await.unwrap();
        assert!(resp.status().is_client_error());
    }
}
