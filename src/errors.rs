// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Only configuration problems are fatal. Entries that vanish or become
//! unreadable mid-scan are dropped from that cycle by the scanner, and a
//! failing update command is reported as an [`UpdateOutcome`] rather than an
//! error.
//!
//! [`UpdateOutcome`]: crate::exec::UpdateOutcome

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FwatchError {
    /// Shorthand for building a [`FwatchError::ConfigError`].
    pub fn config(msg: impl Into<String>) -> Self {
        FwatchError::ConfigError(msg.into())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FwatchError>;
