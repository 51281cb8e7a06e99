//! Error types for CLI commands
//!
//! Configuration errors pass through unchanged so that the user sees the
//! library's own message after `Error: `.

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// The configuration declares no syncs and none were requested
    #[error("No sync operations defined in configuration")]
    NoSyncsDefined,

    /// Neither `--config` nor an XDG config home is available
    #[error("Could not determine the configuration directory; use --config")]
    NoConfigDir,

    /// The log file could not be opened
    #[error("Failed to open log file: {0}")]
    LogFile(#[source] std::io::Error),

    /// Command output could not be written
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] arsync_config::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
