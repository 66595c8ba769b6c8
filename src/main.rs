//! Vectorfields - a procedural city flythrough
//!
//! Headless host: generates the scene, plays the camera tracks against a
//! stepped (or wall-clock) tick and records every frame's draw calls.

mod settings;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vectorfields_game::{FrameOutcome, Session};
use vectorfields_render::RecordingBackend;

use settings::{HostSettings, Settings};

/// Totals gathered while the session runs
#[derive(Debug, Default)]
struct RunSummary {
    frames: u64,
    draws: u64,
    faded_frames: u64,
}

fn run(session: &mut Session, host: &HostSettings) -> RunSummary {
    let mut backend = RecordingBackend::new();
    let mut summary = RunSummary::default();
    let started = Instant::now();
    let step = Duration::from_millis(host.tick_step_ms);
    let mut stepped_tick: i64 = 0;

    while session.is_alive() {
        if host.max_frames.is_some_and(|max| summary.frames >= max) {
            info!("Frame limit of {} reached", summary.frames);
            break;
        }

        let tick = if host.realtime {
            i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX)
        } else {
            stepped_tick
        };
        stepped_tick += host.tick_step_ms as i64;

        backend.clear();
        if session.render_frame(tick, host.width, host.height, &mut backend)
            == FrameOutcome::Rendered
        {
            summary.frames += 1;
            summary.draws += backend.draw_count() as u64;
            if backend.fade().is_some() {
                summary.faded_frames += 1;
            }
        }

        if host.realtime {
            thread::sleep(step);
        }
    }

    info!("Submitted {} vertices in total", backend.vertices_submitted());
    summary
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting vectorfields...");

    let settings = Settings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save().context("Failed to write settings file")?;
    }

    let mut session =
        Session::init(settings.session.clone()).context("Failed to generate the scene")?;
    let summary = run(&mut session, &settings.host);

    info!(
        "Rendered {} frames ({} draws, {} with fade) ending at tick {}",
        summary.frames,
        summary.draws,
        summary.faded_frames,
        session.clock().tick()
    );
    session.deinit();
    Ok(())
}
