//! Error types for cros-config-schema

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single schema violation found in a flattened config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value (empty for the document root)
    pub path: String,
    /// What the schema expected
    pub message: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Errors that can occur while transforming or validating a config
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `{{name}}` reference that no scope binds, including one left over
    /// after the single extra expansion pass
    #[error("Referenced template variable '{variable}' doesn't exist (in '{value}')")]
    TemplateVariable { variable: String, value: String },

    #[error("Config does not match the schema:\n{}", format_violations(.violations))]
    SchemaValidation { violations: Vec<SchemaViolation> },

    #[error("Invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("Identities are not unique: {duplicates:?} (all identities: {identities:?})")]
    Uniqueness {
        identities: Vec<String>,
        duplicates: Vec<String>,
    },

    #[error("Invalid config source: {message}")]
    InvalidSource { message: String },

    #[error("Failed to parse {format} content: {message}")]
    Parse { format: String, message: String },

    #[error(transparent)]
    Fs(#[from] cros_config_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
        }
    }
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
