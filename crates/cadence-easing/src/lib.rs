//! Frame-based easing for Cadence.
//!
//! This crate provides:
//! - **Curves**: the standard Penner easing equations ([`Curve`], [`evaluate`])
//! - **Tweens**: immutable per-phase interpolation descriptions ([`Tween`])
//!
//! Evaluation is pure; nothing here owns animation progress.

pub mod easing;
pub mod tween;

pub use easing::{Curve, ParseCurveError, evaluate};
pub use tween::Tween;
