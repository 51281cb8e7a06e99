//! CLI command implementations
//!
//! This module contains all command implementations for the arsync CLI.

pub mod dry_run;
pub mod list;
pub mod refresh;
pub mod sync;
