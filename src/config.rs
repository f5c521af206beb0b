//! Runtime configuration: an optional TOML file, overridden by CLI flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GameError, Result};

pub const DEFAULT_FPS: u32 = 60;
pub const MIN_FPS: u32 = 10;
pub const MAX_FPS: u32 = 240;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    /// Write tones to the log.
    #[default]
    Log,
    /// Ring the terminal bell.
    Bell,
    Off,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ticks per second.  Power-up timers assume 60.
    pub fps: u32,
    /// Fixed RNG seed; random when absent.
    pub seed: Option<u64>,
    pub audio: AudioMode,
    pub log_file: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seed: None,
            audio: AudioMode::default(),
            log_file: PathBuf::from("sky_shooter.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(GameError::InvalidConfig {
                field: "fps",
                reason: format!("must be between {MIN_FPS} and {MAX_FPS}, got {}", self.fps),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(GameError::InvalidConfig {
                field: "log_filter",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Milliseconds per tick at the configured rate.
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.fps.max(1)) as u64
    }
}
