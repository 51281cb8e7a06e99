//! # arsync engine
//!
//! Turns resolved sync specs into external transfer processes:
//!
//! - **Command building**: local vs remote, credential wrapping ([`CommandBuilder`])
//! - **Execution**: one blocking process per sync, output captured ([`JobExecutor`])
//! - **Fan-out**: concurrent or serial execution over many syncs ([`ParallelRunner`])

pub mod command;
pub mod error;
pub mod executor;
pub mod runner;

pub use command::{CommandBuilder, Invocation};
pub use error::{Error, Result};
pub use executor::{JobExecutor, JobResult};
pub use runner::{ParallelRunner, ResultSet};
