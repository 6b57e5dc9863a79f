//! Six-frame sprite strip played back at an adjustable rate.

use anyhow::Result;
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, Rect, colors};

use crate::assets::{AssetError, TextureInfo};

pub const FRAME_COUNT: u32 = 6;
pub const MIN_FRAME_SPEED: u32 = 1;
pub const MAX_FRAME_SPEED: u32 = 15;

const SPRITE_POSITION: [f32; 2] = [350.0, 280.0];

#[derive(Debug, Clone)]
pub struct SpriteAnim {
    texture: TextureInfo,
    frame_width: u32,
    current_frame: u32,
    frames_counter: u32,
    /// Sprite frames shown per second.
    frames_speed: u32,
}

impl SpriteAnim {
    pub fn new(texture: TextureInfo) -> Result<Self, AssetError> {
        let frame_width = texture.frame_width(FRAME_COUNT)?;
        Ok(Self {
            texture,
            frame_width,
            current_frame: 0,
            frames_counter: 0,
            frames_speed: 8,
        })
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn frames_speed(&self) -> u32 {
        self.frames_speed
    }

    /// Source rectangle of the current frame within the strip.
    pub fn frame_rect(&self) -> Rect {
        Rect::new(
            (self.current_frame * self.frame_width) as f32,
            0.0,
            self.frame_width as f32,
            self.texture.height as f32,
        )
    }
}

impl FrameHandler for SpriteAnim {
    fn update(&mut self, state: &mut LoopState, input: &InputState) -> Result<()> {
        self.frames_counter += 1;
        let advance_every = (state.target_frame_rate() as u32 / self.frames_speed).max(1);
        if self.frames_counter >= advance_every {
            self.frames_counter = 0;
            self.current_frame = (self.current_frame + 1) % FRAME_COUNT;
        }

        if input.is_key_pressed(Key::Right) {
            self.frames_speed += 1;
        } else if input.is_key_pressed(Key::Left) {
            self.frames_speed = self.frames_speed.saturating_sub(1);
        }
        self.frames_speed = self.frames_speed.clamp(MIN_FRAME_SPEED, MAX_FRAME_SPEED);
        Ok(())
    }

    fn render(&self, _state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        frame.clear(colors::RAYWHITE);

        let whole = Rect::new(
            0.0,
            0.0,
            self.texture.width as f32,
            self.texture.height as f32,
        );
        frame.texture_region(&self.texture.name, whole, [15.0, 40.0], colors::WHITE);
        let mut outline = self.frame_rect();
        outline.x += 15.0;
        outline.y += 40.0;
        frame.stroke_rect(outline, 1.0, colors::RED);

        frame.text("FRAME SPEED: ", [165.0, 210.0], 10.0, colors::DARKGRAY);
        frame.text(
            format!("{:02} FPS", self.frames_speed),
            [575.0, 210.0],
            10.0,
            colors::DARKGRAY,
        );
        frame.text(
            "PRESS RIGHT/LEFT KEYS to CHANGE SPEED!",
            [290.0, 240.0],
            10.0,
            colors::DARKGRAY,
        );
        for i in 0..MAX_FRAME_SPEED {
            let cell = Rect::new(250.0 + 21.0 * i as f32, 205.0, 20.0, 20.0);
            if i < self.frames_speed {
                frame.fill_rect(cell, colors::RED);
            }
            frame.stroke_rect(cell, 1.0, colors::MAROON);
        }

        frame.texture_region(
            &self.texture.name,
            self.frame_rect(),
            SPRITE_POSITION,
            colors::WHITE,
        );
        Ok(())
    }
}
