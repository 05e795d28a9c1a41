use std::path::PathBuf;

use thiserror::Error;

use crate::game::ConfigKey;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("cannot generate equations for {key}: {reason}")]
    InvalidProfile { key: ConfigKey, reason: String },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("settings file {path} could not be read")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is malformed")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("high score file is corrupt: {0}")]
    Corrupt(String),
    #[cfg(test)]
    #[error("high score storage is unavailable")]
    Unavailable,
}
