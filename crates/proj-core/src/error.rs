//! Error types for proj-core

use proj_config::ErrorKind;

/// Result type for proj-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving the project model
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration field has the wrong shape
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A rule pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}' in rule {rule}: {message}")]
    InvalidPattern {
        rule: usize,
        pattern: String,
        message: String,
    },

    // Transparent wrappers for underlying crate errors
    /// Configuration error from proj-config
    #[error(transparent)]
    Config(#[from] proj_config::Error),

    /// Filesystem error from proj-fs
    #[error(transparent)]
    Fs(#[from] proj_fs::Error),
}

impl Error {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error as a configuration or a resolution failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(inner) => inner.kind(),
            _ => ErrorKind::Config,
        }
    }
}
