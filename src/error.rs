//! Error types for Glossa.
//!
//! Every fallible operation in the crate returns [`Result`]. The binary maps
//! each variant to a semantic exit code via [`Error::exit_code`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A message was requested from a catalogue that does not contain it.
    #[error("Undefined string in domain '{domain}'")]
    UndefinedMessage {
        /// Domain that was queried.
        domain: String,
        /// Message id that was not found.
        id: String,
    },

    /// Locale is not known to the catalogue manager or loader.
    #[error("Undefined locale '{0}'")]
    UnknownLocale(String),

    /// The plural selector could not pick a form for the given count.
    #[error("Pluralization error: {0}")]
    Pluralization(String),

    /// Configuration error (invalid config file, missing required values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A translation file could not be parsed.
    #[error("Unable to load '{}': {message}", path.display())]
    Format {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// IO error (file operations, cache storage, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// General/unspecified error.
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the exit code for this error type.
    ///
    /// - 1: General error
    /// - 2: Invalid arguments or configuration
    /// - 5: Locale or message not found
    /// - 10: IO error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidArgument(_) => 2,

            Error::UnknownLocale(_) | Error::UndefinedMessage { .. } => 5,

            Error::Io(_) => 10,

            Error::Pluralization(_)
            | Error::Format { .. }
            | Error::Json(_)
            | Error::Yaml(_)
            | Error::Other(_) => 1,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a format error for the given file.
    pub fn format(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Error::Format { path: path.into(), message: msg.into() }
    }

    /// Create a pluralization error.
    pub fn pluralization(msg: impl Into<String>) -> Self {
        Error::Pluralization(msg.into())
    }

    /// Create a general error.
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
