pub mod bouncing_ball;
pub mod easing_ball;
pub mod easing_box;
pub mod music_stream;
pub mod sound_multi;
pub mod sprite_anim;
pub mod window_should_close;

pub use bouncing_ball::BouncingBall;
pub use easing_ball::EasingBall;
pub use easing_box::EasingBox;
pub use music_stream::MusicPlayer;
pub use sound_multi::SoundMulti;
pub use sprite_anim::SpriteAnim;
pub use window_should_close::ConfirmClose;

/// Logical screen size the demos lay themselves out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(800.0, 450.0)
    }
}

/// Run `handler` for exactly `frames` iterations on a virtual 60 fps clock.
#[cfg(test)]
pub(crate) fn run_scripted<H: cadence_loop::FrameHandler>(
    handler: H,
    mut script: cadence_loop::ScriptedInput,
    frames: u64,
) -> (H, cadence_loop::RecordingPresenter, cadence_loop::RunStats) {
    use cadence_loop::{FrameLoop, ManualClock, RecordingPresenter};

    let mut limited = crate::FrameLimit::new(handler, frames);
    let mut presenter = RecordingPresenter::new();
    let mut frame_loop = FrameLoop::with_clock(60.0, ManualClock::new()).unwrap();
    let stats = frame_loop
        .run_session(&mut script, &mut presenter, &mut limited)
        .unwrap();
    (limited.into_inner(), presenter, stats)
}
