//! Terminal Blockdrop runner (default binary).
//!
//! Crossterm for input, a framebuffer-based renderer for output, and the
//! engine ticking off a monotonic clock. Logging goes to stderr via
//! `env_logger` (`RUST_LOG=debug` for per-event detail); redirect stderr when
//! playing, the alternate screen owns stdout.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use blockdrop::core::{Engine, GameEvent, GameSnapshot};
use blockdrop::input::{handle_key_event, should_quit};
use blockdrop::term::{GameView, TerminalRenderer, Viewport};
use blockdrop::types::TICK_MS;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1);
    info!("starting game with seed {seed}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut engine = Engine::new(seed);
    engine.start();

    let view = GameView::default();
    let mut snapshot = GameSnapshot::new();
    let mut frame = blockdrop::term::FrameBuffer::new(0, 0);

    let clock = Instant::now();
    let mut last_frame = Instant::now();
    let frame_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut frame);
        term.draw_swap(&mut frame)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit at score {}", engine.score());
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        engine.apply_command(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity off the monotonic clock.
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            engine.tick(clock.elapsed().as_millis() as u64);
        }

        for event in engine.take_events() {
            match event {
                GameEvent::LinesCleared { count } => {
                    debug!("cleared {count} lines, score {}", engine.score());
                }
                GameEvent::GameOver { final_score } => {
                    info!("game over, final score {final_score}");
                }
            }
        }
    }
}
