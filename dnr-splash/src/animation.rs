//! Rev-counter animation math
//!
//! Maps elapsed time onto the RPM shown by the splash gauge. The value
//! climbs from 0 to `MAX_RPM` over `DURATION` along a cubic ease-out, holds
//! at the top for `HOLD`, then fades out over `EXIT`.

use dnr_common::Easing;
use std::time::Duration;

/// Time for the needle to climb from 0 to `MAX_RPM`
pub const DURATION: Duration = Duration::from_millis(2000);

/// RPM reached at the end of the climb
pub const MAX_RPM: u32 = 7000;

/// Time spent at `MAX_RPM` before the exit fade starts
pub const HOLD: Duration = Duration::from_millis(300);

/// Length of the exit fade; completion fires when it ends
pub const EXIT: Duration = Duration::from_millis(500);

/// Frame period of the driving timer (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Splash lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Needle climbing towards `MAX_RPM`
    Running,
    /// Needle parked at `MAX_RPM`
    HoldingAtMax,
    /// Exit fade in progress
    Exiting,
    /// Completion callback has fired (or is firing)
    Done,
}

impl SplashPhase {
    /// Opacity of the splash view in this phase
    ///
    /// The view fades to transparent as soon as it starts exiting.
    pub fn opacity(&self) -> f64 {
        match self {
            SplashPhase::Running | SplashPhase::HoldingAtMax => 1.0,
            SplashPhase::Exiting | SplashPhase::Done => 0.0,
        }
    }
}

/// Timing parameters for one splash run
#[derive(Debug, Clone, PartialEq)]
pub struct SplashTiming {
    pub duration: Duration,
    pub max_rpm: u32,
    pub hold: Duration,
    pub exit: Duration,
    pub frame_interval: Duration,
    pub easing: Easing,
}

impl Default for SplashTiming {
    fn default() -> Self {
        Self {
            duration: DURATION,
            max_rpm: MAX_RPM,
            hold: HOLD,
            exit: EXIT,
            frame_interval: FRAME_INTERVAL,
            easing: Easing::CubicOut,
        }
    }
}

impl SplashTiming {
    /// Time from start until the completion callback fires
    pub fn total(&self) -> Duration {
        self.duration + self.hold + self.exit
    }
}

/// Snapshot of the animation at one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Fraction of `duration` elapsed, 0.0 to 1.0
    pub elapsed_ratio: f64,
    /// `easing.apply(elapsed_ratio)`
    pub eased_ratio: f64,
    /// RPM shown on the gauge, 0 to `max_rpm`
    pub display_value: u32,
    pub phase: SplashPhase,
}

impl AnimationState {
    /// State at mount time
    pub fn initial() -> Self {
        Self {
            elapsed_ratio: 0.0,
            eased_ratio: 0.0,
            display_value: 0,
            phase: SplashPhase::Running,
        }
    }

    /// State of the climb after `elapsed` time
    ///
    /// Returns `Running` while the climb is in progress and `HoldingAtMax`
    /// once `elapsed >= duration`. The later phases are time-independent of
    /// the climb and are entered by the animator.
    pub fn at(timing: &SplashTiming, elapsed: Duration) -> Self {
        let elapsed_ratio = if timing.duration.is_zero() {
            1.0
        } else {
            elapsed.min(timing.duration).as_secs_f64() / timing.duration.as_secs_f64()
        };
        let eased_ratio = timing.easing.apply(elapsed_ratio);
        let mut display_value = (eased_ratio * timing.max_rpm as f64).floor() as u32;

        // Ratios a hair below 1.0 can round up to exactly 1.0 after easing;
        // the maximum is only shown once the climb is over.
        if elapsed_ratio < 1.0 {
            display_value = display_value.min(timing.max_rpm.saturating_sub(1));
        }

        let phase = if elapsed_ratio >= 1.0 {
            SplashPhase::HoldingAtMax
        } else {
            SplashPhase::Running
        };

        Self {
            elapsed_ratio,
            eased_ratio,
            display_value,
            phase,
        }
    }

    /// Same frame in a different phase
    pub fn with_phase(self, phase: SplashPhase) -> Self {
        Self { phase, ..self }
    }

    /// True once the climb has reached the top
    pub fn climb_complete(&self) -> bool {
        self.elapsed_ratio >= 1.0
    }
}
