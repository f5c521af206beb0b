//! Error types for sky_shooter

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<toml::de::Error> for GameError {
    fn from(err: toml::de::Error) -> Self {
        GameError::ConfigParse(err.to_string())
    }
}
