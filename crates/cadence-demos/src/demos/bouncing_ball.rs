//! Ball bouncing off the screen edges, with Space to pause.

use anyhow::Result;
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, colors};

use super::Screen;

#[derive(Debug, Clone)]
pub struct BouncingBall {
    screen: Screen,
    position: [f32; 2],
    speed: [f32; 2],
    radius: f32,
    paused: bool,
    /// Ticks while paused; drives the blinking label.
    frames_counter: u64,
}

impl BouncingBall {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            position: [screen.width / 2.0, screen.height / 2.0],
            speed: [5.0, 4.0],
            radius: 20.0,
            paused: false,
            frames_counter: 0,
        }
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn speed(&self) -> [f32; 2] {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn label_visible(&self) -> bool {
        (self.frames_counter / 30) % 2 != 0
    }

    fn step_axis(position: &mut f32, speed: &mut f32, radius: f32, extent: f32) {
        *position += *speed;
        if *position >= extent - radius || *position <= radius {
            *speed = -*speed;
        }
    }
}

impl FrameHandler for BouncingBall {
    fn update(&mut self, _state: &mut LoopState, input: &InputState) -> Result<()> {
        if input.is_key_pressed(Key::Space) {
            self.paused = !self.paused;
            log::debug!("bouncing ball paused: {}", self.paused);
        }

        if self.paused {
            self.frames_counter += 1;
            return Ok(());
        }

        let [x, y] = &mut self.position;
        let [dx, dy] = &mut self.speed;
        Self::step_axis(x, dx, self.radius, self.screen.width);
        Self::step_axis(y, dy, self.radius, self.screen.height);
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        frame.fill_circle(self.position, self.radius, colors::MAROON);
        frame.text(
            "PRESS SPACE to PAUSE BALL MOVEMENT",
            [10.0, self.screen.height - 25.0],
            20.0,
            colors::LIGHTGRAY,
        );
        if self.paused && self.label_visible() {
            frame.text("PAUSED", [350.0, 200.0], 30.0, colors::GRAY);
        }
        Ok(())
    }
}
