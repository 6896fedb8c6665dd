//! Error types for the Unity Browser shell.

use std::io;

/// Errors produced by the shell core.
#[derive(Debug, thiserror::Error)]
pub enum UnityError {
    #[error("store error: {0}")]
    Store(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, UnityError>;
