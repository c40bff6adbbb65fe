//! dnr-splash library - loading screen rev counter
//!
//! Drives the RPM needle shown while the site loads:
//! - `animation`: pure per-frame math (eased RPM, phases)
//! - `gauge`: needle/arc geometry and SVG rendering
//! - `animator`: cancellable frame timer that runs one splash to completion

pub mod animation;
pub mod animator;
pub mod gauge;

pub use animation::{AnimationState, SplashPhase, SplashTiming};
pub use animator::{SplashAnimator, SplashHandle, SplashOutcome};
