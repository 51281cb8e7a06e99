//! Base error types for arsync
//!
//! This module provides the foundation error types that all crates can use.

use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// A secret could not be obtained for a host
    #[error("Failed to obtain password for {host}: {reason}")]
    Credential { host: String, reason: String },
}

impl Error {
    /// Create a `Credential` error for a host
    pub fn credential(host: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Credential {
            host: host.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
