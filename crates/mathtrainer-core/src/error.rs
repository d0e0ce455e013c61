//! Error types for the trainer engine.
//!
//! Only the fallible edges (storage, config, remote sync) produce errors.
//! Generation, scoring, skill mapping and achievement evaluation are total.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TrainerError {
    /// Short stable label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            TrainerError::Storage(_) => "storage",
            TrainerError::Config(_) => "config",
            TrainerError::Sync(_) => "sync",
            TrainerError::Io(_) => "io",
            TrainerError::Json(_) => "json",
            TrainerError::Toml(_) => "toml",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
