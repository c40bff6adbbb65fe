//! Easing curves for time-driven animations
//!
//! An easing curve re-maps a linear time fraction (0.0 to 1.0) onto a
//! perceptually smoother progress fraction. All curves are monotonic and
//! fixed at both ends: `apply(0.0) == 0.0`, `apply(1.0) == 1.0`.

use crate::{Error, Result};
use std::f64::consts::PI;
use std::str::FromStr;

/// Easing curve types
///
/// - Linear: constant rate of change
/// - CubicOut: fast start, slow finish (an engine revving up and settling)
/// - CubicIn: slow start, fast finish
/// - SCurve: smooth acceleration and deceleration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear: e(t) = t
    Linear,

    /// Cubic ease-out: e(t) = 1 - (1-t)³ (default, the rev-counter feel)
    #[default]
    CubicOut,

    /// Cubic ease-in: e(t) = t³
    CubicIn,

    /// S-Curve: e(t) = 0.5 × (1 - cos(π × t))
    SCurve,
}

impl Easing {
    /// Map a linear time fraction onto eased progress
    ///
    /// # Arguments
    /// * `t` - Normalized time (0.0 to 1.0); values outside are clamped
    ///
    /// # Returns
    /// Eased progress in 0.0 to 1.0
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::CubicIn => t * t * t,
            Easing::SCurve => 0.5 * (1.0 - (PI * t).cos()),
        }
    }

    /// Canonical configuration string (lowercase, underscored)
    pub fn as_config_str(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::CubicOut => "cubic_out",
            Easing::CubicIn => "cubic_in",
            Easing::SCurve => "s_curve",
        }
    }

    /// Get human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::CubicOut => "Cubic Ease-Out",
            Easing::CubicIn => "Cubic Ease-In",
            Easing::SCurve => "S-Curve",
        }
    }

    /// Get all available easing variants
    pub fn all_variants() -> &'static [Easing] {
        &[
            Easing::Linear,
            Easing::CubicOut,
            Easing::CubicIn,
            Easing::SCurve,
        ]
    }
}

impl FromStr for Easing {
    type Err = Error;

    /// Parse curve from a config value
    ///
    /// Accepts the canonical names plus the CSS-style aliases
    /// (`ease-out`, `ease-in`, `ease-in-out`). Case insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Easing::Linear),
            "cubic_out" | "cubic-out" | "ease-out" | "ease_out" => Ok(Easing::CubicOut),
            "cubic_in" | "cubic-in" | "ease-in" | "ease_in" => Ok(Easing::CubicIn),
            "s_curve" | "s-curve" | "scurve" | "ease-in-out" => Ok(Easing::SCurve),
            other => Err(Error::InvalidInput(format!("unknown easing curve '{}'", other))),
        }
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
