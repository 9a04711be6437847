//! Error types for cros-config-host

/// Result type for resolution and query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying a config
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Path '{path}' not found in model {model}")]
    PathNotFound { model: String, path: String },

    #[error("Property '{property}' not found at '{path}' in model {model}")]
    PropertyNotFound {
        model: String,
        path: String,
        property: String,
    },

    #[error("Model {model} shares firmware with unknown model {shared_model}")]
    SharedModelNotFound { model: String, shared_model: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Config is a compiled device-tree blob; no decoder is available")]
    DeviceTreeBlob,

    // Transparent wrappers for underlying crate errors
    #[error(transparent)]
    Transform(#[from] cros_config_schema::Error),

    #[error(transparent)]
    Fs(#[from] cros_config_fs::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this is a per-query absence rather than a broken config.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ModelNotFound { .. } | Self::PathNotFound { .. } | Self::PropertyNotFound { .. }
        )
    }
}
