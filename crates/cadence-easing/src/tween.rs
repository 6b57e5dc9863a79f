//! A single eased interpolation between two values.
//!
//! # Example
//!
//! ```
//! use cadence_easing::{Curve, Tween};
//!
//! // Drop a box from above the screen to its center over two seconds at 60fps.
//! let drop = Tween::between(Curve::ElasticOut, -100.0, 225.0, 120);
//! assert_eq!(drop.value_at(0.0), -100.0);
//! assert_eq!(drop.value_at(120.0), 225.0);
//! ```

use serde::{Deserialize, Serialize};

use super::easing::{Curve, evaluate};

/// Immutable description of one animation phase.
///
/// The tween holds no progress of its own; callers pass the elapsed frame
/// count on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// Curve used for interpolation.
    pub curve: Curve,
    /// Value at `elapsed == 0`.
    pub start: f32,
    /// Total change; the end value is `start + change`.
    pub change: f32,
    /// Length of the phase in frames. Must be positive.
    pub duration: u32,
}

impl Tween {
    pub fn new(curve: Curve, start: f32, change: f32, duration: u32) -> Self {
        Self {
            curve,
            start,
            change,
            duration,
        }
    }

    /// Create a tween from explicit start and end values.
    pub fn between(curve: Curve, from: f32, to: f32, duration: u32) -> Self {
        Self::new(curve, from, to - from, duration)
    }

    /// Set the curve for this tween.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Value after `elapsed` frames. Not clamped to the duration.
    pub fn value_at(&self, elapsed: f32) -> f32 {
        evaluate(
            self.curve,
            elapsed,
            self.start,
            self.change,
            self.duration as f32,
        )
    }

    /// Value for an elapsed frame counter, clamped to the end of the phase.
    pub fn value_at_frame(&self, elapsed_frames: u64) -> f32 {
        if self.is_finished(elapsed_frames) {
            self.end()
        } else {
            self.value_at(elapsed_frames as f32)
        }
    }

    pub fn end(&self) -> f32 {
        self.start + self.change
    }

    /// Whether `elapsed_frames` has reached the end of the phase.
    pub fn is_finished(&self, elapsed_frames: u64) -> bool {
        elapsed_frames >= u64::from(self.duration)
    }
}
