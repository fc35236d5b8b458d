//! Core error types for lingo-rs.
//!
//! This module provides the [`LingoError`] enum shared by every crate in the
//! workspace. Configuration, catalog, and initialization failures are fatal to
//! startup; a missing translation is never an error and is handled by the
//! renderer's fallback instead.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for lingo-rs.
///
/// Each variant is classified by [`LingoError::is_fatal`]: everything raised
/// while loading settings or catalogs aborts startup, while I/O errors raised
/// by adapters (e.g. the CLI printing output) are left to the caller.
#[derive(Error, Debug)]
pub enum LingoError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Lifecycle ────────────────────────────────────────────────────

    /// The language service was used before `load` installed it.
    #[error("Language service not initialized. Call i18n::load() first.")]
    NotInitialized,

    // ── Catalogs ─────────────────────────────────────────────────────

    /// A resource file could not be parsed into catalog entries.
    #[error("Malformed catalog '{}': {reason}", .path.display())]
    MalformedCatalog {
        /// The offending resource file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LingoError {
    /// Returns `true` if this error should abort startup.
    ///
    /// - `ConfigurationError`, `MalformedCatalog` -> fatal (fix and restart)
    /// - `NotInitialized` -> fatal (the host called into the service too early)
    /// - `IoError` -> not fatal by itself
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::ConfigurationError(_) | Self::MalformedCatalog { .. } | Self::NotInitialized => {
                true
            }
            Self::IoError(_) => false,
        }
    }

    /// Builds a [`LingoError::MalformedCatalog`] for the given file.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A convenience type alias for `Result<T, LingoError>`.
pub type LingoResult<T> = Result<T, LingoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LingoError::ConfigurationError("missing locale".into());
        assert_eq!(err.to_string(), "Configuration error: missing locale");

        let err = LingoError::malformed("/tmp/es.yaml", "top level must be a mapping");
        assert_eq!(
            err.to_string(),
            "Malformed catalog '/tmp/es.yaml': top level must be a mapping"
        );
    }

    #[test]
    fn test_not_initialized_display() {
        assert!(LingoError::NotInitialized
            .to_string()
            .contains("not initialized"));
    }

    #[test]
    fn test_is_fatal() {
        assert!(LingoError::ConfigurationError("x".into()).is_fatal());
        assert!(LingoError::NotInitialized.is_fatal());
        assert!(LingoError::malformed("a.json", "x").is_fatal());
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!LingoError::from(io_err).is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LingoError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }
}
