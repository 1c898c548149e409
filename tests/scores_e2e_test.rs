//! Score service end to end: axum server on an ephemeral port, hyper gateway,
//! and the background runtime used by the game loop.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::oneshot;

use pentris::app::App;
use pentris::core::GameConfig;
use pentris::scores::{
    run_server, GatewayConfig, ScoreGateway, ScoreReply, ScoreRuntime, ScoreServerConfig,
    ScoreSubmission,
};

fn server_config() -> ScoreServerConfig {
    ScoreServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ScoreServerConfig::default()
    }
}

fn gateway_config(addr: SocketAddr) -> GatewayConfig {
    GatewayConfig {
        url: format!("http://{addr}/scores"),
        timeout_ms: 2000,
        disabled: false,
    }
}

async fn spawn_server() -> SocketAddr {
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = run_server(server_config(), Some(ready_tx)).await;
    });
    tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped")
}

/// Address that refuses connections: bind, read the port, close.
async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn poll_replies(rt: &mut ScoreRuntime, want: usize) -> Vec<ScoreReply> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut replies = Vec::new();
    while replies.len() < want && Instant::now() < deadline {
        match rt.try_recv() {
            Some(reply) => replies.push(reply),
            None => std::thread::sleep(Duration::from_millis(5)),
        }
    }
    replies
}

#[tokio::test]
async fn gateway_submit_and_fetch_round_trip() {
    let addr = spawn_server().await;
    let gateway = ScoreGateway::new(&gateway_config(addr)).unwrap();

    assert!(gateway.fetch_top_scores().await.is_empty());

    gateway.submit_score("ADA", 120, 3, 9).await;
    gateway.submit_score("BOB", 300, 6, 20).await;
    let scores = gateway.submit_score("", 40, 1, 2).await;

    let names: Vec<&str> = scores.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["BOB", "ADA", "ANON"]);
    assert_eq!(scores[0].level, 6);
    assert_eq!(scores[0].lines, 20);

    let fetched = tokio_test::assert_ok!(gateway.try_fetch_top_scores().await);
    assert_eq!(fetched, scores);
}

#[tokio::test]
async fn gateway_shows_only_top_ten() {
    let addr = spawn_server().await;
    let gateway = ScoreGateway::new(&gateway_config(addr)).unwrap();

    for i in 0..15u32 {
        let sub = ScoreSubmission::new(&format!("p{i}"), i * 100, 1, 0);
        tokio_test::assert_ok!(gateway.try_submit_score(&sub).await);
    }
    let top = gateway.fetch_top_scores().await;
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].score, 1400);
    assert_eq!(top[9].score, 500);
    assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn gateway_degrades_to_empty_when_unreachable() {
    let addr = closed_addr().await;
    let gateway = ScoreGateway::new(&gateway_config(addr)).unwrap();

    assert!(gateway.fetch_top_scores().await.is_empty());
    assert!(gateway.submit_score("ADA", 10, 1, 1).await.is_empty());
    tokio_test::assert_err!(gateway.try_fetch_top_scores().await);
    tokio_test::assert_err!(
        gateway
            .try_submit_score(&ScoreSubmission::new("ADA", 10, 1, 1))
            .await
    );
}

#[tokio::test]
async fn health_endpoint_answers() {
    let addr = spawn_server().await;
    let gateway = ScoreGateway::new(&GatewayConfig {
        url: format!("http://{addr}/health"),
        ..gateway_config(addr)
    })
    .unwrap();
    // `/health` is plain text, so the JSON leaderboard parse fails but the
    // connection itself succeeds.
    let err = gateway.try_fetch_top_scores().await.unwrap_err();
    assert!(err.to_string().contains("malformed"), "{err:#}");
}

#[test]
fn runtime_replies_carry_their_session() {
    let server_rt = tokio::runtime::Runtime::new().unwrap();
    let addr = server_rt.block_on(spawn_server());

    let mut rt = ScoreRuntime::start(&gateway_config(addr)).unwrap().unwrap();
    rt.submit(7, ScoreSubmission::new("ZED", 250, 5, 12));
    let replies = poll_replies(&mut rt, 1);
    assert_eq!(replies.len(), 1);
    match &replies[0] {
        ScoreReply::Submitted { session_id, result } => {
            assert_eq!(*session_id, 7);
            let scores = result.as_ref().unwrap();
            assert_eq!(scores[0].name, "ZED");
        }
        other => panic!("unexpected reply {other:?}"),
    }

    rt.request_leaderboard(8);
    let replies = poll_replies(&mut rt, 1);
    assert_eq!(replies[0].session_id(), 8);
}

#[test]
fn runtime_submit_failure_is_reported() {
    let server_rt = tokio::runtime::Runtime::new().unwrap();
    let addr = server_rt.block_on(closed_addr());

    let mut rt = ScoreRuntime::start(&gateway_config(addr)).unwrap().unwrap();
    rt.submit(1, ScoreSubmission::new("ADA", 10, 1, 1));
    rt.request_leaderboard(1);

    let replies = poll_replies(&mut rt, 2);
    assert_eq!(replies.len(), 2);
    for reply in replies {
        match reply {
            ScoreReply::Submitted { result, .. } => assert!(result.is_err()),
            ScoreReply::Leaderboard { scores, .. } => assert!(scores.is_empty()),
        }
    }
}

#[test]
fn app_picks_up_live_leaderboard_and_drops_stale_replies() {
    let server_rt = tokio::runtime::Runtime::new().unwrap();
    let addr = server_rt.block_on(async {
        let addr = spawn_server().await;
        let gateway = ScoreGateway::new(&gateway_config(addr)).unwrap();
        gateway.submit_score("ADA", 900, 9, 50).await;
        addr
    });

    // Session 0 (not started): the startup fetch should land.
    let rt = ScoreRuntime::start(&gateway_config(addr)).unwrap();
    let mut app = App::new(&GameConfig::default(), 5, rt);
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.leaderboard().is_empty() && Instant::now() < deadline {
        app.tick(0);
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(app.leaderboard()[0].name, "ADA");

    // A reply addressed to a session that is gone changes nothing.
    app.handle_key(KeyEvent::from(KeyCode::Enter));
    let stale = ScoreReply::Leaderboard {
        session_id: 0,
        scores: Vec::new(),
    };
    assert!(!app.handle_reply(stale));
    assert_eq!(app.leaderboard()[0].name, "ADA");
}

#[tokio::test]
async fn disabled_gateway_starts_no_runtime() {
    let config = GatewayConfig::from_env_with(|k| match k {
        "PENTRIS_SCORES_DISABLED" => Some("1".to_string()),
        _ => None,
    });
    // Checked before any runtime is built, so this is safe inside tokio.
    assert!(ScoreRuntime::start(&config).unwrap().is_none());
}
