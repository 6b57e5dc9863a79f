//! Box that drops in, stretches into a bar, spins, fills the screen and
//! fades out. Space restarts the sequence at any point.

use anyhow::Result;
use cadence_easing::{Curve, Tween};
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, Rect, colors, fade};

use super::Screen;

/// Animation phases, in playback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxPhase {
    Drop,
    Stretch,
    Rotate,
    Fill,
    Fade,
    /// Animation finished; waiting for a replay.
    Done,
}

impl BoxPhase {
    /// Length in frames, or `None` for the terminal phase.
    pub fn duration(self) -> Option<u64> {
        match self {
            Self::Drop | Self::Stretch | Self::Fill => Some(120),
            Self::Rotate => Some(240),
            Self::Fade => Some(160),
            Self::Done => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Drop => Self::Stretch,
            Self::Stretch => Self::Rotate,
            Self::Rotate => Self::Fill,
            Self::Fill => Self::Fade,
            Self::Fade | Self::Done => Self::Done,
        }
    }

    /// Phase after `elapsed_frames` in this one.
    pub fn transition(self, elapsed_frames: u64) -> Self {
        match self.duration() {
            Some(duration) if elapsed_frames >= duration => self.next(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EasingBox {
    screen: Screen,
    rect: Rect,
    rotation: f32,
    alpha: f32,
    phase: BoxPhase,
}

impl EasingBox {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            rect: Rect::new(screen.width / 2.0, -100.0, 100.0, 100.0),
            rotation: 0.0,
            alpha: 1.0,
            phase: BoxPhase::Drop,
        }
    }

    pub fn phase(&self) -> BoxPhase {
        self.phase
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    fn reset(&mut self) {
        *self = Self::new(self.screen);
    }

    /// Set the animated properties for `elapsed_frames` into the current phase.
    fn apply(&mut self, elapsed_frames: u64) {
        let Screen { width, height } = self.screen;
        let frames = self.phase.duration().unwrap_or(0) as u32;
        match self.phase {
            BoxPhase::Drop => {
                self.rect.y = Tween::new(Curve::ElasticOut, -100.0, height / 2.0 + 100.0, frames)
                    .value_at_frame(elapsed_frames);
            }
            BoxPhase::Stretch => {
                self.rect.h =
                    Tween::new(Curve::BounceOut, 100.0, -90.0, frames).value_at_frame(elapsed_frames);
                self.rect.w =
                    Tween::new(Curve::BounceOut, 100.0, width, frames).value_at_frame(elapsed_frames);
            }
            BoxPhase::Rotate => {
                self.rotation =
                    Tween::new(Curve::QuadOut, 0.0, 270.0, frames).value_at_frame(elapsed_frames);
            }
            BoxPhase::Fill => {
                self.rect.h =
                    Tween::new(Curve::CircOut, 10.0, width, frames).value_at_frame(elapsed_frames);
            }
            BoxPhase::Fade => {
                self.alpha =
                    Tween::new(Curve::SineOut, 1.0, -1.0, frames).value_at_frame(elapsed_frames);
            }
            BoxPhase::Done => {}
        }
    }
}

impl FrameHandler for EasingBox {
    fn update(&mut self, state: &mut LoopState, input: &InputState) -> Result<()> {
        if input.is_key_pressed(Key::Space) {
            log::debug!("box animation reset");
            self.reset();
            state.reset_elapsed_frames();
            return Ok(());
        }

        let elapsed = state.elapsed_frames();
        self.apply(elapsed);
        let next = self.phase.transition(elapsed);
        if next != self.phase {
            log::debug!("box animation {:?} -> {:?}", self.phase, next);
            self.phase = next;
            state.reset_elapsed_frames();
        }
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        frame.fill_rect_rotated(
            self.rect,
            [self.rect.w / 2.0, self.rect.h / 2.0],
            self.rotation,
            fade(colors::BLACK, self.alpha),
        );
        frame.text(
            "PRESS [SPACE] TO RESET BOX ANIMATION!",
            [10.0, self.screen.height - 25.0],
            20.0,
            colors::LIGHTGRAY,
        );
        Ok(())
    }
}
