//! One sound file fanned out over a pool of aliases so rapid presses can
//! overlap instead of restarting the same voice.

use std::path::Path;

use anyhow::{Context, Result};
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, colors};

use crate::audio::{AudioDevice, SoundPool};

pub const MAX_SOUNDS: usize = 10;

pub struct SoundMulti {
    device: Box<dyn AudioDevice>,
    /// Taken on teardown.
    pool: Option<SoundPool>,
}

impl SoundMulti {
    pub fn new(mut device: Box<dyn AudioDevice>, path: &Path) -> Result<Self> {
        let pool = SoundPool::load(device.as_mut(), path, MAX_SOUNDS)
            .with_context(|| format!("loading sound pool from {}", path.display()))?;
        Ok(Self {
            device,
            pool: Some(pool),
        })
    }

    pub fn pool(&self) -> Option<&SoundPool> {
        self.pool.as_ref()
    }
}

impl FrameHandler for SoundMulti {
    fn update(&mut self, _state: &mut LoopState, input: &InputState) -> Result<()> {
        if input.is_key_pressed(Key::Space) {
            if let Some(pool) = self.pool.as_mut() {
                let slot = pool.play_next(self.device.as_mut())?;
                log::debug!("played sound slot {slot}");
            }
        }
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);
        frame.text("Press SPACE to PLAY a WAV sound!", [200.0, 180.0], 20.0, colors::LIGHTGRAY);
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        if let Some(pool) = self.pool.take() {
            pool.release(self.device.as_mut())
                .context("releasing sound pool")?;
        }
        Ok(())
    }
}
