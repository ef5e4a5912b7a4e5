//! Error types for proj-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from proj-core
    #[error(transparent)]
    Core(#[from] proj_core::Error),

    /// JSON rendering error
    #[error("Failed to render JSON: {0}")]
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

    /// Process exit code: 2 for unresolvable modules, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(e) if e.kind() == proj_core::ErrorKind::Resolution => 2,
            _ => 1,
        }
    }
}
