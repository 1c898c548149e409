//! Terminal Pentris runner (default binary).
//!
//! Single-threaded loop: poll crossterm for input with a frame timeout, feed
//! keys, touch-pad clicks and elapsed time to [`App`], then draw the frame as a
//! diff. Score service traffic runs on the background `ScoreRuntime`.
//!
//! Logs go to the file named by `PENTRIS_LOG_PATH` (nothing is logged when it
//! is unset, since stdout belongs to the game).

use std::fs::File;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn, Level};
use tracing_subscriber::prelude::*;

use pentris::app::App;
use pentris::core::GameConfig;
use pentris::scores::ScoreRuntime;
use pentris::term::{FrameBuffer, TerminalRenderer};
use pentris::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();
    let seed = config.seed.unwrap_or_else(clock_seed);
    let scores = ScoreRuntime::start_from_env().unwrap_or_else(|err| {
        warn!(error = %err, "score service unavailable, leaderboard disabled");
        None
    });
    info!(seed, leaderboard = scores.is_some(), "starting pentris");

    let mut app = App::new(&config, seed, scores);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.resize(w, h);
        app.render_into(&mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                // Terminal auto-repeat arrives as repeated presses on most platforms.
                Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            if app.should_quit() {
                return Ok(());
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("PENTRIS_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.to_string_lossy()))?;
    let level = std::env::var("PENTRIS_LOG_LEVEL")
        .ok()
        .and_then(|s| Level::from_str(s.trim()).ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
