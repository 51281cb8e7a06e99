//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or querying the configuration
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The configuration file exists but could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid YAML
    #[error("Invalid YAML in config file {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML is well-formed but does not have the expected structure
    #[error("Invalid config file {origin}: {message}")]
    Schema { origin: String, message: String },

    /// A requested sync is not declared
    #[error("Sync '{name}' not found. Available syncs: {}", available.join(", "))]
    UnknownSync {
        name: String,
        available: Vec<String>,
    },

    /// A sync declaration lacks a required field
    #[error("Sync '{name}' is missing required field '{field}'")]
    MissingField { name: String, field: &'static str },

    /// A sync field is present but is not a string
    #[error("Sync '{name}' field '{field}' must be a string")]
    InvalidField { name: String, field: &'static str },
}

impl Error {
    /// Create a `Schema` error
    pub fn schema(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            origin: origin.into(),
            message: message.into(),
        }
    }
}
