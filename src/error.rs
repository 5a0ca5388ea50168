//! Crate-wide error types.
//!
//! Library modules return [`Error`] via `thiserror`, while the binary uses
//! `anyhow` for convenient propagation at the top level.
//!
//! # Design
//!
//! - [`Error`]: failures while *reading* raw rows
//! - [`crate::config::ConfigError`]: config file failures
//! - An empty library is not an error; see [`crate::library::LoadOutcome::NoMusic`]
//! - Malformed individual rows never reach this type; they are defaulted in place
//!
//! # Example
//!
//! ```ignore
//! use music_shelf::error::{Result, ResultExt};
//!
//! fn rows(path: &Path) -> Result<Vec<RawSong>> {
//!     let text = std::fs::read_to_string(path).with_context("reading row file")?;
//!     Ok(serde_json::from_str(&text)?)
//! }
//! ```

use std::path::PathBuf;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw row file could not be decoded
    #[error("Row decoding error: {0}")]
    Rows(#[from] serde_json::Error),

    /// Tag reading error for a single file
    #[error("Metadata error for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Source path does not exist
    #[error("Source not found: {0}")]
    NotFound(PathBuf),

    /// Background task failed to complete
    #[error("Background task failed: {0}")]
    Task(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a metadata error.
    pub fn metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Rows(e).context(ctx))
    }
}
