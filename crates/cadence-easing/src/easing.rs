//! Easing curves for frame-based animation.
//!
//! The curves follow the classic Penner equations, parameterised as
//! `(elapsed, start, change, duration)`:
//! - Linear
//! - Sine, Circ, Cubic, Quad, Expo (in / out / in-out)
//! - Back (overshooting), Bounce, Elastic (in / out / in-out)
//!
//! # Usage
//!
//! ```
//! use cadence_easing::{Curve, evaluate};
//!
//! // Slide from x = 20 to x = 500 over 200 frames.
//! let x = evaluate(Curve::CubicOut, 100.0, 20.0, 480.0, 200.0);
//! assert!(x > 260.0 && x < 500.0);
//! ```
//!
//! `duration` must be positive. `elapsed` is not clamped, so values outside
//! `[0, duration]` extrapolate through the same formula.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Back curves overshoot by this factor (roughly 10%).
const BACK_OVERSHOOT: f32 = 1.70158;

/// Named easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Constant rate of change.
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    CircIn,
    CircOut,
    CircInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Pulls back below the start before moving forward.
    BackIn,
    /// Overshoots the end, then settles back.
    BackOut,
    BackInOut,
    BounceIn,
    /// Decaying bounces against the end value.
    BounceOut,
    BounceInOut,
    /// Growing oscillation that snaps to the end value.
    ElasticIn,
    /// Spring-like decaying oscillation around the end value.
    ElasticOut,
    ElasticInOut,
}

impl Default for Curve {
    fn default() -> Self {
        Self::Linear
    }
}

/// Error returned when a curve name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing curve: {0}")]
pub struct ParseCurveError(pub String);

impl Curve {
    /// Every curve, in declaration order.
    pub const ALL: [Curve; 25] = [
        Curve::Linear,
        Curve::SineIn,
        Curve::SineOut,
        Curve::SineInOut,
        Curve::CircIn,
        Curve::CircOut,
        Curve::CircInOut,
        Curve::CubicIn,
        Curve::CubicOut,
        Curve::CubicInOut,
        Curve::QuadIn,
        Curve::QuadOut,
        Curve::QuadInOut,
        Curve::ExpoIn,
        Curve::ExpoOut,
        Curve::ExpoInOut,
        Curve::BackIn,
        Curve::BackOut,
        Curve::BackInOut,
        Curve::BounceIn,
        Curve::BounceOut,
        Curve::BounceInOut,
        Curve::ElasticIn,
        Curve::ElasticOut,
        Curve::ElasticInOut,
    ];

    /// Snake-case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::SineIn => "sine_in",
            Self::SineOut => "sine_out",
            Self::SineInOut => "sine_in_out",
            Self::CircIn => "circ_in",
            Self::CircOut => "circ_out",
            Self::CircInOut => "circ_in_out",
            Self::CubicIn => "cubic_in",
            Self::CubicOut => "cubic_out",
            Self::CubicInOut => "cubic_in_out",
            Self::QuadIn => "quad_in",
            Self::QuadOut => "quad_out",
            Self::QuadInOut => "quad_in_out",
            Self::ExpoIn => "expo_in",
            Self::ExpoOut => "expo_out",
            Self::ExpoInOut => "expo_in_out",
            Self::BackIn => "back_in",
            Self::BackOut => "back_out",
            Self::BackInOut => "back_in_out",
            Self::BounceIn => "bounce_in",
            Self::BounceOut => "bounce_out",
            Self::BounceInOut => "bounce_in_out",
            Self::ElasticIn => "elastic_in",
            Self::ElasticOut => "elastic_out",
            Self::ElasticInOut => "elastic_in_out",
        }
    }

    /// Whether the curve leaves `[start, start + change]` for elapsed values
    /// inside `[0, duration]`.
    pub fn overshoots(self) -> bool {
        matches!(
            self,
            Self::BackIn
                | Self::BackOut
                | Self::BackInOut
                | Self::ElasticIn
                | Self::ElasticOut
                | Self::ElasticInOut
        )
    }

    /// Evaluate this curve. See [`evaluate`].
    #[inline]
    pub fn evaluate(self, elapsed: f32, start: f32, change: f32, duration: f32) -> f32 {
        evaluate(self, elapsed, start, change, duration)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = ParseCurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Curve::ALL
            .iter()
            .copied()
            .find(|curve| curve.name() == wanted)
            .ok_or_else(|| ParseCurveError(s.to_string()))
    }
}

/// Interpolated value of `curve` after `elapsed` out of `duration`.
///
/// Returns `start` at `elapsed == 0` and `start + change` at
/// `elapsed == duration` (within float rounding for the trigonometric
/// curves). A zero `duration` is a caller error and produces NaN or
/// infinities.
pub fn evaluate(curve: Curve, elapsed: f32, start: f32, change: f32, duration: f32) -> f32 {
    let (t, b, c, d) = (elapsed, start, change, duration);
    match curve {
        Curve::Linear => c * t / d + b,

        Curve::SineIn => -c * (t / d * (PI / 2.0)).cos() + c + b,
        Curve::SineOut => c * (t / d * (PI / 2.0)).sin() + b,
        Curve::SineInOut => -c / 2.0 * ((PI * t / d).cos() - 1.0) + b,

        Curve::CircIn => {
            let t = t / d;
            -c * ((1.0 - t * t).sqrt() - 1.0) + b
        }
        Curve::CircOut => {
            let t = t / d - 1.0;
            c * (1.0 - t * t).sqrt() + b
        }
        Curve::CircInOut => {
            let t = t / (d / 2.0);
            if t < 1.0 {
                -c / 2.0 * ((1.0 - t * t).sqrt() - 1.0) + b
            } else {
                let t = t - 2.0;
                c / 2.0 * ((1.0 - t * t).sqrt() + 1.0) + b
            }
        }

        Curve::CubicIn => {
            let t = t / d;
            c * t * t * t + b
        }
        Curve::CubicOut => {
            let t = t / d - 1.0;
            c * (t * t * t + 1.0) + b
        }
        Curve::CubicInOut => {
            let t = t / (d / 2.0);
            if t < 1.0 {
                c / 2.0 * t * t * t + b
            } else {
                let t = t - 2.0;
                c / 2.0 * (t * t * t + 2.0) + b
            }
        }

        Curve::QuadIn => {
            let t = t / d;
            c * t * t + b
        }
        Curve::QuadOut => {
            let t = t / d;
            -c * t * (t - 2.0) + b
        }
        Curve::QuadInOut => {
            let t = t / (d / 2.0);
            if t < 1.0 {
                c / 2.0 * t * t + b
            } else {
                -c / 2.0 * ((t - 1.0) * (t - 3.0) - 1.0) + b
            }
        }

        Curve::ExpoIn => {
            if t == 0.0 {
                b
            } else {
                c * 2f32.powf(10.0 * (t / d - 1.0)) + b
            }
        }
        Curve::ExpoOut => {
            if t == d {
                b + c
            } else {
                c * (1.0 - 2f32.powf(-10.0 * t / d)) + b
            }
        }
        Curve::ExpoInOut => {
            if t == 0.0 {
                return b;
            }
            if t == d {
                return b + c;
            }
            let t = t / (d / 2.0);
            if t < 1.0 {
                c / 2.0 * 2f32.powf(10.0 * (t - 1.0)) + b
            } else {
                c / 2.0 * (2.0 - 2f32.powf(-10.0 * (t - 1.0))) + b
            }
        }

        Curve::BackIn => {
            let s = BACK_OVERSHOOT;
            let t = t / d;
            c * t * t * ((s + 1.0) * t - s) + b
        }
        Curve::BackOut => {
            let s = BACK_OVERSHOOT;
            let t = t / d - 1.0;
            c * (t * t * ((s + 1.0) * t + s) + 1.0) + b
        }
        Curve::BackInOut => {
            let s = BACK_OVERSHOOT * 1.525;
            let t = t / (d / 2.0);
            if t < 1.0 {
                c / 2.0 * (t * t * ((s + 1.0) * t - s)) + b
            } else {
                let t = t - 2.0;
                c / 2.0 * (t * t * ((s + 1.0) * t + s) + 2.0) + b
            }
        }

        Curve::BounceIn => c - bounce_out(d - t, 0.0, c, d) + b,
        Curve::BounceOut => bounce_out(t, b, c, d),
        Curve::BounceInOut => {
            if t < d / 2.0 {
                (c - bounce_out(d - t * 2.0, 0.0, c, d)) * 0.5 + b
            } else {
                bounce_out(t * 2.0 - d, 0.0, c, d) * 0.5 + c * 0.5 + b
            }
        }

        Curve::ElasticIn => {
            if t == 0.0 {
                return b;
            }
            let t = t / d;
            if t == 1.0 {
                return b + c;
            }
            let p = d * 0.3;
            let s = p / 4.0;
            let t = t - 1.0;
            let post_fix = c * 2f32.powf(10.0 * t);
            -(post_fix * ((t * d - s) * (2.0 * PI) / p).sin()) + b
        }
        Curve::ElasticOut => {
            if t == 0.0 {
                return b;
            }
            let t = t / d;
            if t == 1.0 {
                return b + c;
            }
            let p = d * 0.3;
            let s = p / 4.0;
            c * 2f32.powf(-10.0 * t) * ((t * d - s) * (2.0 * PI) / p).sin() + c + b
        }
        Curve::ElasticInOut => {
            if t == 0.0 {
                return b;
            }
            let t = t / (d / 2.0);
            if t == 2.0 {
                return b + c;
            }
            let p = d * (0.3 * 1.5);
            let s = p / 4.0;
            let t = t - 1.0;
            if t < 0.0 {
                let post_fix = c * 2f32.powf(10.0 * t);
                -0.5 * (post_fix * ((t * d - s) * (2.0 * PI) / p).sin()) + b
            } else {
                let post_fix = c * 2f32.powf(-10.0 * t);
                post_fix * ((t * d - s) * (2.0 * PI) / p).sin() * 0.5 + c + b
            }
        }
    }
}

/// Piecewise parabolic bounce; shared by the three bounce variants.
fn bounce_out(t: f32, b: f32, c: f32, d: f32) -> f32 {
    let t = t / d;
    if t < 1.0 / 2.75 {
        c * (7.5625 * t * t) + b
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        c * (7.5625 * t * t + 0.75) + b
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        c * (7.5625 * t * t + 0.9375) + b
    } else {
        let t = t - 2.625 / 2.75;
        c * (7.5625 * t * t + 0.984375) + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_start_and_end_values() {
        for curve in Curve::ALL {
            let start = evaluate(curve, 0.0, 10.0, 90.0, 60.0);
            let end = evaluate(curve, 60.0, 10.0, 90.0, 60.0);
            assert!(approx_eq(start, 10.0), "{curve} starts at {start}");
            assert!(approx_eq(end, 100.0), "{curve} ends at {end}");
        }
    }

    #[test]
    fn test_cubic_out_reaches_end() {
        assert_eq!(evaluate(Curve::CubicOut, 200.0, 20.0, 480.0, 200.0), 500.0);
    }

    #[test]
    fn test_linear_midpoint() {
        assert!(approx_eq(evaluate(Curve::Linear, 1.0, 0.0, 10.0, 4.0), 2.5));
    }

    #[test]
    fn test_monotonic_curves() {
        let monotonic = [
            Curve::Linear,
            Curve::SineIn,
            Curve::SineOut,
            Curve::SineInOut,
            Curve::CircIn,
            Curve::CircOut,
            Curve::CubicIn,
            Curve::CubicOut,
            Curve::CubicInOut,
            Curve::QuadIn,
            Curve::QuadOut,
            Curve::QuadInOut,
            Curve::ExpoIn,
            Curve::ExpoOut,
        ];
        for curve in monotonic {
            let mut previous = evaluate(curve, 0.0, 0.0, 1.0, 100.0);
            for frame in 1..=100 {
                let value = evaluate(curve, frame as f32, 0.0, 1.0, 100.0);
                assert!(value + 1e-6 >= previous, "{curve} decreased at frame {frame}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_ease_in_is_slow_then_fast() {
        assert!(evaluate(Curve::CubicIn, 25.0, 0.0, 1.0, 100.0) < 0.25);
        assert!(evaluate(Curve::QuadIn, 50.0, 0.0, 1.0, 100.0) < 0.5);
        assert!(evaluate(Curve::CubicOut, 25.0, 0.0, 1.0, 100.0) > 0.25);
        assert!(evaluate(Curve::QuadOut, 50.0, 0.0, 1.0, 100.0) > 0.5);
    }

    #[test]
    fn test_in_out_symmetry() {
        for curve in [Curve::SineInOut, Curve::CubicInOut, Curve::QuadInOut] {
            let early = evaluate(curve, 25.0, 0.0, 1.0, 100.0);
            let late = evaluate(curve, 75.0, 0.0, 1.0, 100.0);
            assert!(approx_eq(early + late, 1.0), "{curve} is not symmetric");
            assert!(approx_eq(evaluate(curve, 50.0, 0.0, 1.0, 100.0), 0.5));
        }
    }

    #[test]
    fn test_elastic_out_overshoots_end() {
        let peak = (1..120)
            .map(|frame| evaluate(Curve::ElasticOut, frame as f32, 0.0, 1.0, 120.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "elastic out should overshoot, peak {peak}");
    }

    #[test]
    fn test_elastic_in_dips_below_start() {
        let trough = (1..200)
            .map(|frame| evaluate(Curve::ElasticIn, frame as f32, 20.0, 500.0, 200.0))
            .fold(f32::MAX, f32::min);
        assert!(trough < 20.0, "elastic in should dip below start, trough {trough}");
    }

    #[test]
    fn test_back_out_overshoots() {
        assert!(Curve::BackOut.overshoots());
        assert!(evaluate(Curve::BackOut, 70.0, 0.0, 1.0, 100.0) > 1.0);
        assert!(evaluate(Curve::BackIn, 20.0, 0.0, 1.0, 100.0) < 0.0);
    }

    #[test]
    fn test_bounce_stays_in_range() {
        for frame in 0..=120 {
            let value = evaluate(Curve::BounceOut, frame as f32, 0.0, 1.0, 120.0);
            assert!((-EPSILON..=1.0 + EPSILON).contains(&value));
        }
        assert!(!Curve::BounceOut.overshoots());
    }

    #[test]
    fn test_out_of_range_extrapolates() {
        // Linear keeps going past the end instead of clamping.
        assert!(approx_eq(evaluate(Curve::Linear, 8.0, 0.0, 10.0, 4.0), 20.0));
        assert!(approx_eq(evaluate(Curve::QuadIn, -2.0, 0.0, 1.0, 2.0), 1.0));
        assert!(evaluate(Curve::ExpoOut, 300.0, 0.0, 1.0, 200.0).is_finite());
    }

    #[test]
    fn test_deterministic() {
        for curve in Curve::ALL {
            let a = evaluate(curve, 37.0, 3.0, -12.5, 90.0);
            let b = evaluate(curve, 37.0, 3.0, -12.5, 90.0);
            assert_eq!(a.to_bits(), b.to_bits(), "{curve}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("cubic_out".parse::<Curve>(), Ok(Curve::CubicOut));
        assert_eq!("Elastic-In-Out".parse::<Curve>(), Ok(Curve::ElasticInOut));
        assert_eq!(
            "wobble".parse::<Curve>(),
            Err(ParseCurveError("wobble".to_string()))
        );
        for curve in Curve::ALL {
            assert_eq!(curve.name().parse::<Curve>(), Ok(curve));
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(Curve::default(), Curve::Linear);
    }
}
