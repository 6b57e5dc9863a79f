//! Cadence configuration system
//!
//! Settings are read from `cadence.toml` in the working directory, falling
//! back to `<config dir>/cadence/cadence.toml`, then to built-in defaults.
//! Environment variables override whatever was loaded.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for in the working and user config directories.
pub const CONFIG_FILE: &str = "cadence.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CadenceConfig {
    /// Which demo to run
    pub demo: DemoConfig,
    /// Window and headless run settings
    pub window: WindowConfig,
    /// Frame pacing
    pub timing: TimingConfig,
    /// Asset paths used by the demos
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Demo name (easing_box, easing_ball, bouncing_ball, sprite_anim,
    /// window_should_close, sound_multi, music_stream)
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Run without a window, replaying the demo's scripted input
    pub headless: bool,
    /// Stop a headless run after this many frames
    pub max_frames: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Frames per second the loop is capped to
    pub target_fps: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Sprite sheet image (six frames laid out horizontally)
    pub sprite_sheet: Option<PathBuf>,
    /// Sound effect for the multi-channel demo
    pub sound: Option<PathBuf>,
    /// Music track for the streaming demo
    pub music: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cadence".to_string(),
            width: 800,
            height: 450,
            headless: false,
            max_frames: 600,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { target_fps: 60.0 }
    }
}

impl CadenceConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Candidate config file locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("cadence").join(CONFIG_FILE));
        }
        paths
    }

    /// Load the first config file that exists, or defaults if none does.
    ///
    /// A file that exists but fails to parse is an error rather than being
    /// silently replaced by defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.is_file() {
                log::debug!("loading config from {}", path.display());
                return Self::load_from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable numeric values are ignored with a warning.
    pub fn merge_with_env(&mut self) {
        if let Ok(name) = std::env::var("CADENCE_DEMO") {
            self.demo.name = Some(name);
        }
        if let Ok(val) = std::env::var("CADENCE_TARGET_FPS") {
            match val.parse::<f64>() {
                Ok(fps) => self.timing.target_fps = fps,
                Err(_) => log::warn!("ignoring CADENCE_TARGET_FPS={val}: not a number"),
            }
        }
        if let Ok(val) = std::env::var("CADENCE_HEADLESS") {
            self.window.headless = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("CADENCE_MAX_FRAMES") {
            match val.parse::<u64>() {
                Ok(frames) => self.window.max_frames = frames,
                Err(_) => log::warn!("ignoring CADENCE_MAX_FRAMES={val}: not a frame count"),
            }
        }
        if let Ok(path) = std::env::var("CADENCE_SPRITE_SHEET") {
            self.assets.sprite_sheet = Some(PathBuf::from(path));
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from cadence.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_or_default()?;
        config.merge_with_env();
        Ok(config)
    }
}
