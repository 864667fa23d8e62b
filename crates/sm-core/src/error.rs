//! Error types for sm-core

use thiserror::Error;

/// Core error type for sqlmove
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: A source file or source directory could not be read
    #[error("[E004] Failed to read source '{path}': {source}")]
    SourceUnreadable {
        path: String,
        source: std::io::Error,
    },

    /// E005: A destination file or directory could not be created or written
    #[error("[E005] Failed to write destination '{path}': {source}")]
    DestinationWrite {
        path: String,
        source: std::io::Error,
    },

    /// E006: A materialized destination file could not be read back as text
    #[error("[E006] Failed to read destination '{path}': {source}")]
    DestinationRead {
        path: String,
        source: std::io::Error,
    },

    /// E007: Two source files in one category share a numeric prefix
    #[error("[E007] Duplicate {category} index {index}: '{first}' and '{second}'")]
    DuplicateIndex {
        category: String,
        index: u64,
        first: String,
        second: String,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn source_unreadable(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::SourceUnreadable {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn destination_write(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::DestinationWrite {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn destination_read(path: &std::path::Path, source: std::io::Error) -> Self {
        CoreError::DestinationRead {
            path: path.display().to_string(),
            source,
        }
    }
}
