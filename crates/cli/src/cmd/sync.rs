//! Sync command implementation
//!
//! Runs the requested syncs, concurrently unless `--no-parallel` is given.

use arsync_engine::{ParallelRunner, ResultSet};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Sync command
#[derive(Debug, Clone)]
pub struct SyncCommand {
    /// Syncs to run, in the order requested
    pub names: Vec<String>,
    /// Run syncs concurrently
    pub parallel: bool,
}

impl Command for SyncCommand {
    type Output = ResultSet;

    fn execute(&self, context: &RuntimeContext) -> Result<ResultSet> {
        tracing::debug!(
            count = self.names.len(),
            parallel = self.parallel,
            "Starting syncs"
        );

        let runner = ParallelRunner::new(context.executor());
        Ok(runner.run_all(&self.names, self.parallel))
    }
}
