//! Configuration management for arsync
//!
//! This crate handles:
//! - Configuration loading and validation
//! - Variable parsing and `${NAME}` substitution
//! - Resolving syncs into concrete transfer specs
//! - XDG directory management
//! - Logging initialization

pub mod config;
pub mod dirs;
pub mod error;
pub mod logging;
pub mod variables;

pub use config::{ConfigStore, DEFAULT_RSYNC_FLAGS, GlobalConfig, ResolvedJobSpec};
pub use dirs::default_config_file;
pub use error::{Error, Result};
pub use variables::{Substitution, VariableMap};
