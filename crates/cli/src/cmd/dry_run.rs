//! Dry-run command implementation
//!
//! Shows the invocation each sync would run. Never prompts for passwords and
//! never starts a process.

use arsync_engine::Invocation;
use std::io::{self, Write};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Dry-run command
#[derive(Debug, Clone)]
pub struct DryRunCommand {
    /// Syncs to preview, in the order requested
    pub names: Vec<String>,
}

impl Command for DryRunCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        self.write_preview(context, &mut io::stdout().lock(), &mut io::stderr().lock())?;
        Ok(())
    }
}

impl DryRunCommand {
    /// Write the header and one line per sync; unresolvable syncs go to `err`
    ///
    /// # Errors
    ///
    /// Returns an error if either writer fails.
    pub fn write_preview(
        &self,
        context: &RuntimeContext,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<()> {
        writeln!(out, "Dry run mode - would execute the following:")?;

        for name in &self.names {
            // A bad sync is reported on its own line; the others still print
            match preview(context, name) {
                Ok(invocation) => writeln!(out, "  {name}: {invocation}")?,
                Err(e) => writeln!(err, "  {name}: ERROR - {e}")?,
            }
        }

        Ok(())
    }
}

/// Build the invocation a sync would run
///
/// # Errors
///
/// Returns an error if the sync cannot be resolved.
pub fn preview(context: &RuntimeContext, name: &str) -> arsync_engine::Result<Invocation> {
    let spec = context.store.resolve_job(name)?;
    context.builder.build(&spec, true)
}
