//! Error types for proj-config

use std::path::PathBuf;

/// Result type for proj-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of configuration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required file is missing or malformed, or the preset chain is invalid.
    Config,
    /// A module reference (preset or loader) could not be resolved.
    Resolution,
}

/// Errors that can occur while loading project configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The package manifest is required
    #[error("Package manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// A configuration, preset or manifest file could not be understood
    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A declared preset could not be resolved to a file
    #[error("Preset '{reference}' could not be resolved: {source}")]
    PresetNotFound {
        reference: String,
        #[source]
        source: Box<Error>,
    },

    /// The preset chain is longer than allowed
    #[error("Preset chain exceeds {max} levels at '{reference}'")]
    PresetDepthExceeded { reference: String, max: usize },

    /// Module resolution failed
    #[error("Cannot resolve module '{reference}' from {from}")]
    ModuleNotFound { reference: String, from: PathBuf },

    /// The module resolved but nothing can execute it
    #[error("Module '{reference}' at {path} is not an invocable loader")]
    LoaderUnavailable { reference: String, path: PathBuf },

    /// A loader reported a failure while processing content
    #[error("Loader '{reference}' failed: {message}")]
    LoaderFailed { reference: String, message: String },

    /// Filesystem error from proj-fs
    #[error(transparent)]
    Fs(#[from] proj_fs::Error),
}

impl Error {
    /// Classify this error as a configuration or a resolution failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ModuleNotFound { .. } | Self::LoaderUnavailable { .. } => ErrorKind::Resolution,
            _ => ErrorKind::Config,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
