//! Error handling for busline
//!
//! Bus operations themselves never fail: registering, removing and emitting
//! accept every key and listener. Errors only come from the surface around
//! the bus, loading configuration and installing the global instance.
//!
//! A panicking listener is not an [`Error`]. It unwinds through
//! [`EventBus::emit`](crate::EventBus::emit) to the emitter unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for busline
#[derive(Error, Debug)]
pub enum Error {
    /// Standard I/O error while reading or writing a config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file content could not be parsed
    #[error("Invalid {format} config: {reason}")]
    ConfigParse {
        /// The format that was being parsed (`JSON` or `TOML`).
        format: &'static str,
        /// The parser's message.
        reason: String,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {reason}")]
    ConfigSerialize {
        /// The serializer's message.
        reason: String,
    },

    /// Config path has an extension other than `.json` or `.toml`
    #[error("Config file must be .json or .toml: {}", path.display())]
    UnsupportedConfigFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// Config values failed validation
    #[error("Invalid config: {reason}")]
    InvalidConfig {
        /// Which rule was violated.
        reason: String,
    },

    /// The global bus was already created
    #[error("Global event bus is already initialized")]
    AlreadyInitialized,
}

impl Error {
    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigParse { .. }
                | Error::ConfigSerialize { .. }
                | Error::UnsupportedConfigFormat { .. }
                | Error::InvalidConfig { .. }
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
