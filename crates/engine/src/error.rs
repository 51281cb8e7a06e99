//! Error types for arsync-engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or running a transfer
#[derive(Error, Debug)]
pub enum Error {
    /// The sync could not be resolved from the configuration
    #[error(transparent)]
    Config(#[from] arsync_config::Error),

    /// A password could not be obtained
    #[error(transparent)]
    Credential(#[from] arsync_core::Error),

    /// The transfer process could not be started
    #[error("Failed to start {tool}: {source}")]
    ProcessSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The transfer process exited with a non-zero status
    #[error("{tool} failed: {stderr}")]
    ProcessExecution { tool: String, stderr: String },
}
