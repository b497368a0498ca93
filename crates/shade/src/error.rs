//! Error types for the theme runtime.
//!
//! Configuration and usage errors surface as [`ThemeError`] to the immediate
//! caller. Environment problems (no OS appearance, storage I/O failing after
//! setup) are logged where they occur and never reach the caller.

use std::io;
use std::path::PathBuf;

use shade_style::{ConfigError, InvalidModeError, StyleError};

/// Errors raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file does not hold a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the theme runtime.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme config is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A style could not be resolved.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// A mode string was not light, dark or system.
    #[error(transparent)]
    Mode(#[from] InvalidModeError),

    /// The persistence backend failed during setup.
    #[error("theme mode storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Persistence was required but no backend could be set up.
    #[error("theme mode persistence is required but no storage is available: {reason}")]
    StorageUnavailable { reason: String },

    /// A theme accessor was used with no theme provided.
    #[error("{0} must be used within AppTheme::provide")]
    OutsideProvider(&'static str),
}

impl ThemeError {
    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            reason: reason.into(),
        }
    }
}

/// Result alias for the theme runtime.
pub type Result<T> = std::result::Result<T, ThemeError>;
