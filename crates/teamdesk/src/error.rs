//! Error types for TeamDesk.

use std::path::PathBuf;

use thiserror::Error;

use crate::dialog::DialogKind;

/// Errors from opening dialogs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// No factory builds windows of this kind.
    #[error("dialog kind is not supported: {0}")]
    UnsupportedKind(DialogKind),

    /// A window of this kind is open and the duplicate policy rejects a second.
    #[error("{0} window is already open")]
    AlreadyOpen(DialogKind),

    /// The coordinator was shut down.
    #[error("dialog coordinator has shut down")]
    ShutDown,
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for dialog operations.
pub type Result<T> = std::result::Result<T, DialogError>;
