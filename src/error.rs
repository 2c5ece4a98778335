//! Error types for Anvesha

use thiserror::Error;

/// Anvesha error type
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Actuation failed: {0}")]
    Actuation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for TaskError {
    fn from(e: toml::de::Error) -> Self {
        TaskError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
