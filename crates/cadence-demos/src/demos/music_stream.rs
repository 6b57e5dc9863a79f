//! Streamed music with restart, pause and a progress bar.

use anyhow::{Context, Result};
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, Rect, colors};

use crate::audio::MusicStream;

const BAR: Rect = Rect {
    x: 200.0,
    y: 200.0,
    w: 400.0,
    h: 12.0,
};

pub struct MusicPlayer {
    music: Box<dyn MusicStream>,
    paused: bool,
}

impl MusicPlayer {
    /// Wrap `music` and start playing it.
    pub fn new(mut music: Box<dyn MusicStream>) -> Self {
        music.play();
        Self {
            music,
            paused: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn music(&self) -> &dyn MusicStream {
        self.music.as_ref()
    }

    /// Fraction of the track played, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let length = self.music.time_length().as_secs_f32();
        if length <= 0.0 {
            return 0.0;
        }
        (self.music.time_played().as_secs_f32() / length).min(1.0)
    }
}

impl FrameHandler for MusicPlayer {
    fn update(&mut self, state: &mut LoopState, input: &InputState) -> Result<()> {
        self.music
            .update(state.frame_time())
            .context("refilling music stream buffers")?;

        if input.is_key_pressed(Key::Space) {
            self.music.stop();
            self.music.play();
            self.paused = false;
        }

        if input.is_key_pressed(Key::P) {
            self.paused = !self.paused;
            if self.paused {
                self.music.pause();
            } else {
                self.music.resume();
            }
            log::debug!("music paused: {}", self.paused);
        }
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        frame.text("MUSIC SHOULD BE PLAYING!", [255.0, 150.0], 20.0, colors::LIGHTGRAY);

        frame.fill_rect(BAR, colors::LIGHTGRAY);
        frame.fill_rect(Rect::new(BAR.x, BAR.y, BAR.w * self.progress(), BAR.h), colors::MAROON);
        frame.stroke_rect(BAR, 1.0, colors::GRAY);

        frame.text("PRESS SPACE TO RESTART MUSIC", [215.0, 250.0], 20.0, colors::LIGHTGRAY);
        frame.text("PRESS P TO PAUSE/RESUME MUSIC", [208.0, 280.0], 20.0, colors::LIGHTGRAY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::audio::SimulatedMusic;
    use crate::demos::run_scripted;
    use cadence_loop::{DrawCommand, ScriptedInput};

    fn player(seconds: u64) -> MusicPlayer {
        MusicPlayer::new(Box::new(SimulatedMusic::new(
            "country.mp3",
            Duration::from_secs(seconds),
        )))
    }

    fn progress_width(frame: &DisplayList) -> f32 {
        frame
            .commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::FillRect { rect, color } if *color == colors::MAROON => Some(rect.w),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn position_follows_frame_time() {
        // The virtual clock makes every frame exactly one budget long; the
        // first update sees a zero frame time.
        let (player, presenter, _) = run_scripted(player(10), ScriptedInput::new(), 121);
        let played = player.music().time_played().as_secs_f64();
        assert!((played - 2.0).abs() < 1e-3, "played {played}");
        assert!(!player.is_paused());
        let width = progress_width(presenter.last().unwrap());
        assert!((width - 80.0).abs() < 0.1, "width {width}");
    }

    #[test]
    fn pause_freezes_position() {
        let script = ScriptedInput::new().tap(30, Key::P);
        let (player, _, _) = run_scripted(player(10), script, 121);
        assert!(player.is_paused());
        let played = player.music().time_played().as_secs_f64();
        assert!((played - 0.5).abs() < 1e-3, "played {played}");
    }

    #[test]
    fn space_restarts_from_the_beginning() {
        let script = ScriptedInput::new().tap(60, Key::P).tap(90, Key::Space);
        let (player, _, _) = run_scripted(player(10), script, 91);
        assert!(!player.is_paused());
        assert!(player.music().is_playing());
        assert_eq!(player.music().time_played(), Duration::ZERO);
    }

    #[test]
    fn progress_is_clamped_for_zero_length_tracks() {
        let (player, _, _) = run_scripted(player(0), ScriptedInput::new(), 5);
        assert_eq!(player.progress(), 0.0);
    }
}
