use std::time::Duration;

use crate::error::{LoopError, Result};

/// Loop bookkeeping owned by the driver for the lifetime of one run.
///
/// Only update code receives `&mut LoopState`; render code sees a shared
/// reference, so it always observes the state the update just produced.
#[derive(Debug, Clone)]
pub struct LoopState {
    elapsed_frames: u64,
    total_frames: u64,
    target_frame_rate: f64,
    frame_budget: Duration,
    frame_time: Duration,
    close_requested: bool,
}

impl LoopState {
    pub fn new(target_frame_rate: f64) -> Result<Self> {
        let frame_budget = budget_for(target_frame_rate)?;
        Ok(Self {
            elapsed_frames: 0,
            total_frames: 0,
            target_frame_rate,
            frame_budget,
            frame_time: Duration::ZERO,
            close_requested: false,
        })
    }

    /// Frames completed since the loop started or since the last
    /// [`reset_elapsed_frames`](Self::reset_elapsed_frames).
    pub fn elapsed_frames(&self) -> u64 {
        self.elapsed_frames
    }

    pub fn reset_elapsed_frames(&mut self) {
        self.elapsed_frames = 0;
    }

    /// Frames completed since the loop started. Never reset.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn target_frame_rate(&self) -> f64 {
        self.target_frame_rate
    }

    /// Change the frame cap; applies from the next iteration.
    pub fn set_target_frame_rate(&mut self, target_frame_rate: f64) -> Result<()> {
        self.frame_budget = budget_for(target_frame_rate)?;
        self.target_frame_rate = target_frame_rate;
        Ok(())
    }

    /// Minimum wall time per iteration.
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Wall time the previous iteration took, including the pacing wait.
    /// Zero before the first frame completes.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Frame rate measured from the previous iteration, or zero before the
    /// first frame completes.
    pub fn fps(&self) -> f64 {
        let secs = self.frame_time.as_secs_f64();
        if secs > 0.0 { 1.0 / secs } else { 0.0 }
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Stop the loop before its next iteration. Cannot be undone.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub(crate) fn finish_frame(&mut self, frame_time: Duration) {
        self.elapsed_frames += 1;
        self.total_frames += 1;
        self.frame_time = frame_time;
    }
}

/// Per-frame budget for `target_frame_rate`, rejecting rates whose budget
/// is not representable as a `Duration`.
fn budget_for(target_frame_rate: f64) -> Result<Duration> {
    if !(target_frame_rate.is_finite() && target_frame_rate > 0.0) {
        return Err(LoopError::InvalidFrameRate(target_frame_rate));
    }
    Duration::try_from_secs_f64(1.0 / target_frame_rate)
        .map_err(|_| LoopError::InvalidFrameRate(target_frame_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_frame_rates() {
        for fps in [0.0, -30.0, f64::NAN, f64::INFINITY, 1e-20, f64::MIN_POSITIVE] {
            assert!(matches!(
                LoopState::new(fps),
                Err(LoopError::InvalidFrameRate(_))
            ));
        }
    }

    #[test]
    fn frame_budget_matches_rate() {
        let state = LoopState::new(50.0).unwrap();
        assert_eq!(state.frame_budget(), Duration::from_millis(20));
    }

    #[test]
    fn reset_only_touches_elapsed_counter() {
        let mut state = LoopState::new(60.0).unwrap();
        state.finish_frame(Duration::from_millis(16));
        state.finish_frame(Duration::from_millis(16));
        state.reset_elapsed_frames();
        assert_eq!(state.elapsed_frames(), 0);
        assert_eq!(state.total_frames(), 2);
        state.finish_frame(Duration::from_millis(16));
        assert_eq!(state.elapsed_frames(), 1);
    }

    #[test]
    fn fps_from_frame_time() {
        let mut state = LoopState::new(60.0).unwrap();
        assert_eq!(state.fps(), 0.0);
        state.finish_frame(Duration::from_millis(25));
        assert!((state.fps() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn set_target_frame_rate_validates() {
        let mut state = LoopState::new(60.0).unwrap();
        assert!(state.set_target_frame_rate(0.0).is_err());
        assert!(state.set_target_frame_rate(1e-20).is_err());
        assert_eq!(state.target_frame_rate(), 60.0);
        assert_eq!(state.frame_budget(), Duration::from_secs_f64(1.0 / 60.0));
        state.set_target_frame_rate(30.0).unwrap();
        assert_eq!(state.target_frame_rate(), 30.0);
        assert_eq!(state.frame_budget(), Duration::from_secs_f64(1.0 / 30.0));
    }
}
