//! Cancellable frame driver for the splash animation
//!
//! `SplashAnimator::start` spawns one task that ticks a repeating frame timer
//! until the climb completes, then waits out the hold and exit delays and
//! fires the completion callback. Every wait races a `CancellationToken`, so
//! cancelling the handle revokes whichever timer is pending at that moment
//! and the completion callback never runs.
//!
//! Must be called from within a Tokio runtime.

use crate::animation::{AnimationState, SplashPhase, SplashTiming};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How a splash run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashOutcome {
    /// Completion callback fired
    Completed,
    /// Cancelled before completion; the callback did not fire
    Cancelled,
}

/// Starts splash runs with fixed timing
#[derive(Debug, Clone, Default)]
pub struct SplashAnimator {
    timing: SplashTiming,
}

impl SplashAnimator {
    pub fn new(timing: SplashTiming) -> Self {
        Self { timing }
    }

    /// Start a new run from 0 RPM
    ///
    /// `on_frame` is called once per frame while climbing, once more when the
    /// exit fade begins. `on_complete` is called at most once, after
    /// `duration + hold + exit`.
    pub fn start<F, C>(&self, on_frame: F, on_complete: C) -> SplashHandle
    where
        F: FnMut(&AnimationState) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let (phase_tx, phase_rx) = watch::channel(SplashPhase::Running);

        let task = tokio::spawn(drive(
            self.timing.clone(),
            token.clone(),
            phase_tx,
            on_frame,
            on_complete,
        ));

        SplashHandle {
            token,
            phase: phase_rx,
            task: Some(task),
        }
    }

    /// Replace a running splash with a fresh one
    ///
    /// The previous run is cancelled first, so its completion callback can
    /// no longer fire. The new run starts again at 0 RPM.
    pub fn restart<F, C>(&self, previous: SplashHandle, on_frame: F, on_complete: C) -> SplashHandle
    where
        F: FnMut(&AnimationState) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        previous.cancel();
        drop(previous);
        self.start(on_frame, on_complete)
    }
}

/// Handle to a running splash
///
/// Dropping the handle cancels the run (the view was torn down). Use
/// `finished()` to wait for the run to end instead.
pub struct SplashHandle {
    token: CancellationToken,
    phase: watch::Receiver<SplashPhase>,
    task: Option<JoinHandle<SplashOutcome>>,
}

impl SplashHandle {
    /// Revoke whichever frame tick or delay is pending
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SplashPhase {
        *self.phase.borrow()
    }

    /// Receiver that observes phase transitions
    pub fn subscribe(&self) -> watch::Receiver<SplashPhase> {
        self.phase.clone()
    }

    /// Wait for the run to end
    ///
    /// Dropping this future before it resolves cancels the run, the same as
    /// dropping the handle.
    pub async fn finished(mut self) -> SplashOutcome {
        let Some(task) = self.task.as_mut() else {
            return SplashOutcome::Cancelled;
        };

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Splash animation task failed: {}", e);
                SplashOutcome::Cancelled
            }
        };
        self.task = None;
        outcome
    }
}

impl Drop for SplashHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            self.token.cancel();
        }
    }
}

/// Sleep unless cancelled first; true if the full delay elapsed
async fn delay(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

async fn drive<F, C>(
    timing: SplashTiming,
    token: CancellationToken,
    phase_tx: watch::Sender<SplashPhase>,
    mut on_frame: F,
    on_complete: C,
) -> SplashOutcome
where
    F: FnMut(&AnimationState),
    C: FnOnce(),
{
    let start = Instant::now();
    // interval() panics on a zero period
    let mut ticker = tokio::time::interval(timing.frame_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Climb: one frame per tick until the ratio reaches 1
    let last_frame = loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Splash cancelled while running");
                return SplashOutcome::Cancelled;
            }
            _ = ticker.tick() => {}
        }

        let state = AnimationState::at(&timing, start.elapsed());
        on_frame(&state);

        if state.climb_complete() {
            break state;
        }
    };

    phase_tx.send_replace(SplashPhase::HoldingAtMax);
    if !delay(&token, timing.hold).await {
        debug!("Splash cancelled while holding at max");
        return SplashOutcome::Cancelled;
    }

    phase_tx.send_replace(SplashPhase::Exiting);
    on_frame(&last_frame.with_phase(SplashPhase::Exiting));
    if !delay(&token, timing.exit).await {
        debug!("Splash cancelled while exiting");
        return SplashOutcome::Cancelled;
    }

    phase_tx.send_replace(SplashPhase::Done);
    debug!("Splash complete after {:?}", start.elapsed());
    on_complete();

    SplashOutcome::Completed
}
