//! # App Error Type
//!
//! Errors that can stop the storefront from starting, plus the ones raised
//! while reading a command line.
//!
//! ## Where Errors Go
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Startup (config, storage, template)                                   │
//! │       │   AppError                                                      │
//! │       ▼                                                                 │
//! │  main: error! + non-zero exit                                          │
//! │                                                                         │
//! │  Command line that doesn't parse                                       │
//! │       │   AppError::UnknownCommand / InvalidArgument                    │
//! │       ▼                                                                 │
//! │  input reader: warn! and keep reading                                  │
//! │                                                                         │
//! │  Page events (cart, currency, carousel)                                │
//! │       never fail; storage hiccups are logged with warn!                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::CoreError;
use storefront_storage::StorageError;
use thiserror::Error;

/// Application-level error.
#[derive(Debug, Error)]
pub enum AppError {
    /// The config file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// The configuration parsed but is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No platform directory could be determined for a default path.
    #[error("Could not determine {0} directory")]
    NoPlatformDir(&'static str),

    /// Opening or migrating local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The page template could not be read or parsed.
    #[error("Page template error: {0}")]
    Template(String),

    /// First word of a command line is not a known command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A known command with a missing or malformed argument.
    #[error("Invalid argument for '{command}': {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },

    /// Domain error surfaced at startup.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Creates an InvalidArgument error.
    pub fn invalid_argument(command: &'static str, reason: impl Into<String>) -> Self {
        AppError::InvalidArgument {
            command,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;
