//! Error types for cros-config-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the transform pipeline
    #[error(transparent)]
    Schema(#[from] cros_config_schema::Error),

    /// Error from the query engine
    #[error(transparent)]
    Host(#[from] cros_config_host::Error),

    #[error(transparent)]
    Fs(#[from] cros_config_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
