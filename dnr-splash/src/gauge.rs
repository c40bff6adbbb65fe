//! Rev-counter gauge geometry and SVG rendering
//!
//! The dial covers 0 to 8000 RPM over a 270° sweep starting at -135°
//! (pointing to the lower left). All coordinates live in a 200x200 viewBox
//! centred on (100, 100).

use crate::animation::AnimationState;
use std::fmt::Write;

/// RPM at the end of the dial
pub const GAUGE_RANGE: f64 = 8000.0;

/// Needle angle at 0 RPM, degrees
pub const START_ANGLE: f64 = -135.0;

/// Angular sweep of the dial, degrees
pub const SWEEP: f64 = 270.0;

/// Stroke dash array of the arc circles
pub const ARC_DASH_ARRAY: f64 = 400.0;

/// Visible arc length at full scale
pub const ARC_VISIBLE_LENGTH: f64 = 267.0;

/// First major tick (thousands of RPM) drawn in the redline colour
pub const REDLINE_FROM: u32 = 6;

const CENTER: f64 = 100.0;
const ARC_RADIUS: f64 = 85.0;
const MAJOR_TICKS: u32 = 8;
const MINOR_STEPS: u32 = 40;

const COLOR_REDLINE: &str = "hsl(0 75% 45%)";
const COLOR_TICK: &str = "hsl(0 0% 70%)";
const COLOR_MINOR_TICK: &str = "hsl(220 10% 40%)";
const COLOR_ARC_BACKGROUND: &str = "hsl(220 10% 20%)";
const COLOR_CAP: &str = "hsl(220 10% 25%)";
const COLOR_TEXT: &str = "hsl(0 0% 90%)";

/// Needle rotation for an RPM value, degrees
///
/// Linear over the dial: 0 → -135°, 4000 → 0°, 8000 → +135°.
pub fn needle_angle(rpm: u32) -> f64 {
    START_ANGLE + (rpm as f64 / GAUGE_RANGE) * SWEEP
}

/// Fraction of the dial covered by the progress arc, 0.0 to 1.0
pub fn arc_fraction(rpm: u32) -> f64 {
    (rpm as f64 / GAUGE_RANGE).clamp(0.0, 1.0)
}

/// Stroke dash offset of the progress arc
pub fn arc_dash_offset(rpm: u32) -> f64 {
    ARC_DASH_ARRAY - arc_fraction(rpm) * ARC_VISIBLE_LENGTH
}

/// Point in viewBox coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn polar(angle_deg: f64, radius: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self {
            x: CENTER + radius * rad.cos(),
            y: CENTER + radius * rad.sin(),
        }
    }
}

/// One tick mark on the dial
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub angle: f64,
    pub inner: Point,
    pub outer: Point,
    /// Label (thousands of RPM) and its anchor, major ticks only
    pub label: Option<(u32, Point)>,
    pub redline: bool,
}

/// Major ticks at every 1000 RPM, labelled 0 to 8
pub fn major_ticks() -> Vec<Tick> {
    (0..=MAJOR_TICKS)
        .map(|num| {
            let angle = START_ANGLE + num as f64 * (SWEEP / MAJOR_TICKS as f64);
            Tick {
                angle,
                inner: Point::polar(angle, 65.0),
                outer: Point::polar(angle, 75.0),
                label: Some((num, Point::polar(angle, 55.0))),
                redline: num >= REDLINE_FROM,
            }
        })
        .collect()
}

/// Minor ticks at every 200 RPM, skipping the major positions
pub fn minor_ticks() -> Vec<Tick> {
    (0..MINOR_STEPS)
        .filter(|i| i % 5 != 0)
        .map(|i| {
            let angle = START_ANGLE + i as f64 * (SWEEP / MINOR_STEPS as f64);
            Tick {
                angle,
                inner: Point::polar(angle, 70.0),
                outer: Point::polar(angle, 75.0),
                label: None,
                redline: false,
            }
        })
        .collect()
}

/// Format an RPM value with thousands separators (`7000` → `7,000`)
pub fn format_rpm(rpm: u32) -> String {
    let digits = rpm.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render one frame of the gauge as a standalone SVG document
pub fn render_svg(state: &AnimationState) -> String {
    let rpm = state.display_value;
    let mut svg = String::with_capacity(8 * 1024);

    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200" opacity="{:.1}">"#,
        state.phase.opacity()
    );

    // Background arc, then progress arc on top
    let _ = writeln!(
        svg,
        r#"  <circle cx="100" cy="100" r="{r}" fill="none" stroke="{c}" stroke-width="8" stroke-linecap="round" stroke-dasharray="{da}" stroke-dashoffset="{off:.0}" transform="rotate(135 100 100)"/>"#,
        r = ARC_RADIUS,
        c = COLOR_ARC_BACKGROUND,
        da = ARC_DASH_ARRAY,
        off = ARC_DASH_ARRAY - ARC_VISIBLE_LENGTH,
    );
    let _ = writeln!(
        svg,
        r#"  <circle cx="100" cy="100" r="{r}" fill="none" stroke="{c}" stroke-width="8" stroke-linecap="round" stroke-dasharray="{da}" stroke-dashoffset="{off:.2}" transform="rotate(135 100 100)"/>"#,
        r = ARC_RADIUS,
        c = COLOR_REDLINE,
        da = ARC_DASH_ARRAY,
        off = arc_dash_offset(rpm),
    );

    for tick in major_ticks() {
        let color = if tick.redline { COLOR_REDLINE } else { COLOR_TICK };
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2"/>"#,
            tick.inner.x, tick.inner.y, tick.outer.x, tick.outer.y, color
        );
        if let Some((num, at)) = tick.label {
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" fill="{}" font-size="12" font-weight="bold">{}</text>"#,
                at.x, at.y, color, num
            );
        }
    }

    for tick in minor_ticks() {
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
            tick.inner.x, tick.inner.y, tick.outer.x, tick.outer.y, COLOR_MINOR_TICK
        );
    }

    // Needle drawn pointing straight up, then rotated about the hub
    let _ = writeln!(
        svg,
        r#"  <polygon points="98.8,100 101.2,100 100,44" fill="{}" transform="rotate({:.2} 100 100)"/>"#,
        COLOR_REDLINE,
        needle_angle(rpm)
    );
    let _ = writeln!(svg, r#"  <circle cx="100" cy="100" r="12" fill="{}"/>"#, COLOR_CAP);
    let _ = writeln!(svg, r#"  <circle cx="100" cy="100" r="8" fill="{}"/>"#, COLOR_REDLINE);

    let _ = writeln!(
        svg,
        r#"  <text x="100" y="150" text-anchor="middle" fill="{}" font-size="16" font-weight="bold">{}</text>"#,
        COLOR_TEXT,
        format_rpm(rpm)
    );
    let _ = writeln!(
        svg,
        r#"  <text x="100" y="164" text-anchor="middle" fill="{}" font-size="7">RPM</text>"#,
        COLOR_TICK
    );
    svg.push_str("</svg>\n");

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{SplashPhase, SplashTiming, DURATION};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_needle_angle_linear() {
        assert!(approx(needle_angle(0), -135.0));
        assert!(approx(needle_angle(4000), 0.0));
        assert!(approx(needle_angle(8000), 135.0));
        assert!(approx(needle_angle(7000), 101.25));
    }

    #[test]
    fn test_arc_dash_offset() {
        assert!(approx(arc_dash_offset(0), 400.0));
        assert!(approx(arc_dash_offset(8000), 133.0));
        assert!(approx(arc_dash_offset(4000), 266.5));
        // Beyond the dial the arc stays full
        assert!(approx(arc_fraction(9000), 1.0));
    }

    #[test]
    fn test_major_ticks() {
        let ticks = major_ticks();
        assert_eq!(ticks.len(), 9);
        assert!(approx(ticks[0].angle, -135.0));
        assert!(approx(ticks[4].angle, 0.0));
        assert!(approx(ticks[8].angle, 135.0));

        let redline: Vec<u32> = ticks
            .iter()
            .filter(|t| t.redline)
            .filter_map(|t| t.label.map(|(n, _)| n))
            .collect();
        assert_eq!(redline, vec![6, 7, 8]);

        // The 4000 tick points straight right from the hub
        assert!(approx(ticks[4].outer.x, 175.0));
        assert!(approx(ticks[4].outer.y, 100.0));
    }

    #[test]
    fn test_minor_ticks_skip_major_positions() {
        let ticks = minor_ticks();
        assert_eq!(ticks.len(), 32);
        for tick in &ticks {
            assert!(tick.label.is_none());
            let steps = (tick.angle - START_ANGLE) / (SWEEP / 8.0);
            assert!((steps - steps.round()).abs() > 1e-6, "minor tick on major position {}", tick.angle);
        }
    }

    #[test]
    fn test_format_rpm() {
        assert_eq!(format_rpm(0), "0");
        assert_eq!(format_rpm(999), "999");
        assert_eq!(format_rpm(7000), "7,000");
        assert_eq!(format_rpm(6125), "6,125");
        assert_eq!(format_rpm(1234567), "1,234,567");
    }

    #[test]
    fn test_render_svg_frame() {
        let state = AnimationState::at(&SplashTiming::default(), DURATION);
        let svg = render_svg(&state);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(">7,000</text>"));
        assert!(svg.contains("rotate(101.25 100 100)"));
        assert!(svg.contains(r#"opacity="1.0""#));
    }

    #[test]
    fn test_render_svg_exiting_is_transparent() {
        let state = AnimationState::initial().with_phase(SplashPhase::Exiting);
        let svg = render_svg(&state);
        assert!(svg.contains(r#"opacity="0.0""#));
        assert!(svg.contains("rotate(-135.00 100 100)"));
    }
}
