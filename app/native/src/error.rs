//! Error types for Switchbar.
//!
//! Library components return their own error enums ([`TilingError`],
//! [`ConfigError`]); the command-line front end folds them into
//! [`SwitchbarError`] so `main` has a single type to report.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::modules::tiling::TilingError;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum SwitchbarError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Tiling engine operation failed.
    #[error("Tiling error: {0}")]
    TilingError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for SwitchbarError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for SwitchbarError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for SwitchbarError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<TilingError> for SwitchbarError {
    fn from(err: TilingError) -> Self { Self::TilingError(err.to_string()) }
}

impl From<String> for SwitchbarError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for SwitchbarError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}
