//! Terminal runner (default binary).
//!
//! Keys and gravity both become commands in one queue; the game loop drains
//! it once per frame and the resulting snapshot is drawn with the
//! framebuffer renderer.
//!
//! Environment:
//! - `TETRO_WIDTH`, `TETRO_HEIGHT`, `TETRO_SEED`, `TETRO_RANDOMIZER`,
//!   `TETRO_ROTATION`, `TETRO_START_LEVEL`: see `EngineConfig::from_env`
//! - `TETRO_LOG_PATH`: write logs to this file (nothing is logged otherwise,
//!   the terminal belongs to the game)
//! - `TETRO_LOG`: log filter, default `info`

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tetro::core::{CommandQueue, EngineConfig, GameEvent, GameLoop, GameSnapshot, GravityClock};
use tetro::input::{handle_key_event, should_quit};
use tetro::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetro::types::FRAME_MS;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = EngineConfig::from_env();
    if std::env::var_os("TETRO_SEED").is_none() {
        config.seed = clock_seed();
    }
    config.validate().context("invalid TETRO_* configuration")?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("TETRO_LOG_PATH") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TETRO_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<()> {
    let mut game = GameLoop::new(config)?;
    let view = GameView::default();
    let mut queue = CommandQueue::new();
    let mut clock = GravityClock::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_frame = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = game.score(), mode = game.mode().as_str(), "quit");
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        debug!(command = command.as_str(), "input");
                        queue.push(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            if snap.playable() {
                let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
                queue.push_ticks(clock.advance(elapsed_ms, game.drop_interval_ms()));
            }
        }

        game.run_queue(&mut queue);
        for event in game.drain_events() {
            debug!(event = event.name(), ?event, "game event");
            if matches!(event, GameEvent::Resumed | GameEvent::Restarted) {
                clock.reset();
            }
        }
    }
}
