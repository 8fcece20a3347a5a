//! Error types for OKR Copilot.
//!
//! Library crates use [`OkrError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all OKR Copilot operations.
#[derive(Debug, thiserror::Error)]
pub enum OkrError {
    /// A required text input was blank, or a draft failed shape checks.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Baseline submitted for a key result that has no pending gap.
    #[error("no pending baseline gap for key result {index}")]
    StaleGap { index: usize },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Socket bind or serve failure in the HTTP adapter.
    #[error("network error: {0}")]
    Network(String),

    /// Published-OKR store error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Anything that should not happen in normal operation.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OkrError>;

impl OkrError {
    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the caller can fix this by re-submitting different input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::StaleGap { .. })
    }
}

/// Reject blank (empty or whitespace-only) text for a required field.
pub fn require_text(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OkrError::validation(format!("{what} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = OkrError::validation("input is required");
        assert_eq!(err.to_string(), "validation error: input is required");

        let err = OkrError::StaleGap { index: 2 };
        assert!(err.to_string().contains("key result 2"));
    }

    #[test]
    fn recoverable_kinds() {
        assert!(OkrError::validation("x").is_recoverable());
        assert!(OkrError::StaleGap { index: 0 }.is_recoverable());
        assert!(!OkrError::Storage("disk full".into()).is_recoverable());
        assert!(!OkrError::Internal("boom".into()).is_recoverable());
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("", "input").is_err());
        assert!(require_text(" \t\n", "input").is_err());
        assert!(require_text("grow revenue", "input").is_ok());

        let err = require_text("  ", "baseline value").unwrap_err();
        assert_eq!(err.to_string(), "validation error: baseline value is required");
    }
}
