//! Core types and utilities for arsync
//!
//! This is the foundation crate (Layer 0) that all other arsync crates depend on.
//! It provides:
//! - Local path normalization and remote path detection
//! - Base error types
//! - Capability traits (`SecretPrompt`)
//!
//! This crate has no dependencies on other arsync crates.

pub mod error;
pub mod path;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{NoPrompt, SecretPrompt};
