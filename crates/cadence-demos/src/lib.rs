//! Demo programs driven by the cadence frame loop.
//!
//! Each demo is a [`FrameHandler`]; [`build`] wires one up from a
//! [`CadenceConfig`] and [`headless_script`] supplies input for runs
//! without a window.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use cadence_config::CadenceConfig;
use cadence_loop::{DisplayList, FrameHandler, InputState, Key, LoopState, ScriptedInput};
use thiserror::Error;

pub mod assets;
pub mod audio;
pub mod demos;

pub use assets::{AssetError, TextureInfo};
pub use audio::{AudioDevice, AudioError, MusicStream, SimulatedAudio, SimulatedMusic, SoundPool};
pub use demos::Screen;

const DEFAULT_SOUND: &str = "resources/sound.wav";
const DEFAULT_MUSIC: &str = "resources/country.mp3";
const DEFAULT_MUSIC_LENGTH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DemoKind {
    #[default]
    EasingBox,
    EasingBall,
    BouncingBall,
    SpriteAnim,
    WindowShouldClose,
    SoundMulti,
    MusicStream,
}

impl DemoKind {
    pub const ALL: [DemoKind; 7] = [
        DemoKind::EasingBox,
        DemoKind::EasingBall,
        DemoKind::BouncingBall,
        DemoKind::SpriteAnim,
        DemoKind::WindowShouldClose,
        DemoKind::SoundMulti,
        DemoKind::MusicStream,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::EasingBox => "easing_box",
            DemoKind::EasingBall => "easing_ball",
            DemoKind::BouncingBall => "bouncing_ball",
            DemoKind::SpriteAnim => "sprite_anim",
            DemoKind::WindowShouldClose => "window_should_close",
            DemoKind::SoundMulti => "sound_multi",
            DemoKind::MusicStream => "music_stream",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DemoKind::EasingBox => "box drop, stretch, spin, fill and fade",
            DemoKind::EasingBall => "ball slide, inflate and reveal",
            DemoKind::BouncingBall => "wall-bouncing ball with pause",
            DemoKind::SpriteAnim => "sprite strip at adjustable speed",
            DemoKind::WindowShouldClose => "confirm before closing",
            DemoKind::SoundMulti => "overlapping sound aliases",
            DemoKind::MusicStream => "streamed music with progress bar",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown demo {0:?}")]
pub struct UnknownDemo(pub String);

impl FromStr for DemoKind {
    type Err = UnknownDemo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        DemoKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownDemo(s.to_string()))
    }
}

/// Construct the demo `kind`, loading whatever assets `config` names.
pub fn build(kind: DemoKind, config: &CadenceConfig) -> Result<Box<dyn FrameHandler>> {
    let screen = Screen::new(config.window.width as f32, config.window.height as f32);
    let assets = &config.assets;
    log::info!("building demo {kind}");

    let handler: Box<dyn FrameHandler> = match kind {
        DemoKind::EasingBox => Box::new(demos::EasingBox::new(screen)),
        DemoKind::EasingBall => Box::new(demos::EasingBall::new(screen)),
        DemoKind::BouncingBall => Box::new(demos::BouncingBall::new(screen)),
        DemoKind::SpriteAnim => {
            let texture = match &assets.sprite_sheet {
                Some(path) => TextureInfo::load(path)
                    .with_context(|| format!("loading sprite sheet {}", path.display()))?,
                None => {
                    log::info!("no sprite sheet configured, using a placeholder strip");
                    TextureInfo::placeholder("scarfy", 768, 128)
                }
            };
            Box::new(demos::SpriteAnim::new(texture)?)
        }
        DemoKind::WindowShouldClose => Box::new(demos::ConfirmClose::new()),
        DemoKind::SoundMulti => {
            let (device, path) = match &assets.sound {
                Some(path) => (SimulatedAudio::new(), path.clone()),
                None => (
                    SimulatedAudio::new().with_virtual_file(DEFAULT_SOUND),
                    DEFAULT_SOUND.into(),
                ),
            };
            Box::new(demos::SoundMulti::new(Box::new(device), &path)?)
        }
        DemoKind::MusicStream => {
            let path = assets
                .music
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_MUSIC));
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Box::new(demos::MusicPlayer::new(Box::new(SimulatedMusic::new(
                name,
                DEFAULT_MUSIC_LENGTH,
            ))))
        }
    };
    Ok(handler)
}

/// Input that exercises each demo's controls during a headless run.
pub fn headless_script(kind: DemoKind) -> ScriptedInput {
    let script = ScriptedInput::new();
    match kind {
        DemoKind::EasingBox => script.tap(300, Key::Space),
        DemoKind::EasingBall => script.tap(560, Key::Enter),
        DemoKind::BouncingBall => script.tap(120, Key::Space).tap(240, Key::Space),
        DemoKind::SpriteAnim => script
            .tap(60, Key::Right)
            .tap(90, Key::Right)
            .tap(200, Key::Left),
        DemoKind::WindowShouldClose => script
            .close_at(60)
            .tap(90, Key::N)
            .tap(150, Key::Escape)
            .tap(180, Key::Y),
        DemoKind::SoundMulti => (1..=12).fold(script, |script, i| script.tap(i * 20, Key::Space)),
        DemoKind::MusicStream => script
            .tap(120, Key::P)
            .tap(180, Key::P)
            .tap(300, Key::Space),
    }
}

/// Wraps a handler so the loop also stops after `max_frames` frames.
pub struct FrameLimit<H> {
    inner: H,
    max_frames: u64,
}

impl<H: FrameHandler> FrameLimit<H> {
    pub fn new(inner: H, max_frames: u64) -> Self {
        Self { inner, max_frames }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: FrameHandler> FrameHandler for FrameLimit<H> {
    fn should_close(&self, state: &LoopState, input: &InputState) -> bool {
        state.total_frames() >= self.max_frames || self.inner.should_close(state, input)
    }

    fn update(&mut self, state: &mut LoopState, input: &InputState) -> Result<()> {
        self.inner.update(state, input)
    }

    fn render(&self, state: &LoopState, frame: &mut DisplayList) -> Result<()> {
        self.inner.render(state, frame)
    }

    fn teardown(&mut self) -> Result<()> {
        self.inner.teardown()
    }
}
