//! Ball that slides in, inflates past the screen edges and dissolves into
//! the background. Enter replays once the animation is over.

use anyhow::Result;
use cadence_easing::{Curve, Tween};
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, Rect, colors, fade};

use super::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    Slide,
    Inflate,
    Reveal,
    Done,
}

impl BallPhase {
    pub fn duration(self) -> Option<u64> {
        match self {
            Self::Slide => Some(120),
            Self::Inflate | Self::Reveal => Some(200),
            Self::Done => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Slide => Self::Inflate,
            Self::Inflate => Self::Reveal,
            Self::Reveal | Self::Done => Self::Done,
        }
    }

    pub fn transition(self, elapsed_frames: u64) -> Self {
        match self.duration() {
            Some(duration) if elapsed_frames >= duration => self.next(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EasingBall {
    screen: Screen,
    x: f32,
    radius: f32,
    alpha: f32,
    phase: BallPhase,
}

impl EasingBall {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            x: -100.0,
            radius: 20.0,
            alpha: 0.0,
            phase: BallPhase::Slide,
        }
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    fn tween(&self) -> Option<Tween> {
        let frames = self.phase.duration()? as u32;
        Some(match self.phase {
            BallPhase::Slide => {
                Tween::new(Curve::ElasticOut, -100.0, self.screen.width / 2.0 + 100.0, frames)
            }
            BallPhase::Inflate => Tween::new(Curve::ElasticIn, 20.0, 500.0, frames),
            BallPhase::Reveal => Tween::new(Curve::CubicOut, 0.0, 1.0, frames),
            BallPhase::Done => return None,
        })
    }
}

impl FrameHandler for EasingBall {
    fn update(&mut self, state: &mut LoopState, input: &InputState) -> Result<()> {
        if self.phase == BallPhase::Done {
            if input.is_key_pressed(Key::Enter) {
                log::debug!("ball animation replay");
                *self = Self::new(self.screen);
                state.reset_elapsed_frames();
            }
            return Ok(());
        }

        let elapsed = state.elapsed_frames();
        if let Some(tween) = self.tween() {
            let value = tween.value_at_frame(elapsed);
            match self.phase {
                BallPhase::Slide => self.x = value,
                BallPhase::Inflate => self.radius = value,
                BallPhase::Reveal => self.alpha = value,
                BallPhase::Done => {}
            }
        }
        let next = self.phase.transition(elapsed);
        if next != self.phase {
            log::debug!("ball animation {:?} -> {:?}", self.phase, next);
            self.phase = next;
            state.reset_elapsed_frames();
        }
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        if matches!(self.phase, BallPhase::Reveal | BallPhase::Done) {
            frame.fill_rect(
                Rect::new(0.0, 0.0, self.screen.width, self.screen.height),
                colors::GREEN,
            );
        }
        frame.fill_circle([self.x, 200.0], self.radius, fade(colors::RED, 1.0 - self.alpha));
        if self.phase == BallPhase::Done {
            frame.text("PRESS [ENTER] TO PLAY AGAIN!", [240.0, 200.0], 20.0, colors::BLACK);
        }
        Ok(())
    }
}
