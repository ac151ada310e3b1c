use thiserror::Error;

use crate::config::ConfigError;

/// Errors from the command-line host. Invalid field values are not errors;
/// they come back as a [`crate::messages::Report::Invalid`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("--input - cannot be combined with --interactive (both read stdin)")]
    StdinInUse,

    #[error("Input closed before all fields were entered")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
