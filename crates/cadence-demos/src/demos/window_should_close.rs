//! Intercepts the close signal and asks for confirmation before exiting.

use anyhow::Result;
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, Rect, colors};

#[derive(Debug, Clone, Default)]
pub struct ConfirmClose {
    exit_requested: bool,
    exit_confirmed: bool,
}

impl ConfirmClose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn exit_confirmed(&self) -> bool {
        self.exit_confirmed
    }
}

impl FrameHandler for ConfirmClose {
    fn should_close(&self, _state: &LoopState, _input: &InputState) -> bool {
        self.exit_confirmed
    }

    fn update(&mut self, _state: &mut LoopState, input: &InputState) -> Result<()> {
        if input.close_requested() || input.is_key_pressed(Key::Escape) {
            self.exit_requested = true;
        }

        if self.exit_requested {
            if input.is_key_pressed(Key::Y) {
                log::info!("exit confirmed");
                self.exit_confirmed = true;
            } else if input.is_key_pressed(Key::N) {
                self.exit_requested = false;
            }
        }
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        if self.exit_requested {
            frame.fill_rect(Rect::new(0.0, 100.0, 800.0, 200.0), colors::BLACK);
            frame.text(
                "Are you sure you want to exit program? [Y/N]",
                [40.0, 180.0],
                30.0,
                colors::WHITE,
            );
        } else {
            frame.text(
                "Try to close the window to get confirmation message!",
                [120.0, 200.0],
                20.0,
                colors::LIGHTGRAY,
            );
        }
        Ok(())
    }
}
