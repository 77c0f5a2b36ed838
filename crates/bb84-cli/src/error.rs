//! CLI error types.

use bb84_core::{CipherError, ConfigError};

/// Errors that end a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Qubit count or attack flag rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chat message rejected by the cipher.
    #[error("message rejected: {0}")]
    Message(#[from] CipherError),

    /// Writing the report failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the JSON report failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Invalid input exits with 2 (as clap does for bad flags), output
    /// failures with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Message(_) => 2,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }
}
