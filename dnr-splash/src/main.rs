//! dnr-splash - terminal preview of the loading-screen rev counter
//!
//! Runs one splash animation, printing the live RPM and needle angle on a
//! single line, and optionally writes the final frame as an SVG file.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dnr_common::Easing;
use dnr_splash::gauge::{format_rpm, needle_angle, render_svg};
use dnr_splash::{AnimationState, SplashAnimator, SplashOutcome, SplashTiming};
use tracing::info;

/// Command-line arguments for dnr-splash
#[derive(Parser, Debug)]
#[command(name = "dnr-splash")]
#[command(about = "Preview the DNR Transmissions loading-screen rev counter")]
#[command(version)]
struct Args {
    /// Easing curve for the climb (linear, cubic_out, cubic_in, s_curve)
    #[arg(long, default_value = "cubic_out")]
    easing: String,

    /// Climb duration in milliseconds
    #[arg(long, default_value = "2000")]
    duration_ms: u64,

    /// Write the final frame as SVG to this path
    #[arg(long)]
    svg_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnr_splash=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let easing: Easing = args.easing.parse().context("Invalid --easing")?;

    let timing = SplashTiming {
        duration: Duration::from_millis(args.duration_ms),
        easing,
        ..SplashTiming::default()
    };
    info!("Revving to {} RPM over {:?} ({})", timing.max_rpm, timing.duration, easing);

    let last_frame = Arc::new(Mutex::new(AnimationState::initial()));
    let frame_sink = last_frame.clone();

    let animator = SplashAnimator::new(timing);
    let handle = animator.start(
        move |state: &AnimationState| {
            print!(
                "\r{:>6} RPM  needle {:+7.2}°  {:?}      ",
                format_rpm(state.display_value),
                needle_angle(state.display_value),
                state.phase
            );
            let _ = std::io::stdout().flush();
            if let Ok(mut last) = frame_sink.lock() {
                *last = *state;
            }
        },
        || println!(),
    );

    // Ctrl+C drops the finished() future, which cancels the run
    let outcome = tokio::select! {
        outcome = handle.finished() => outcome,
        _ = tokio::signal::ctrl_c() => {
            println!();
            SplashOutcome::Cancelled
        }
    };
    info!("Splash finished: {:?}", outcome);

    if let Some(path) = args.svg_out {
        let frame = *last_frame
            .lock()
            .map_err(|_| anyhow::anyhow!("frame lock poisoned"))?;
        std::fs::write(&path, render_svg(&frame))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote final frame to {}", path.display());
    }

    Ok(())
}
