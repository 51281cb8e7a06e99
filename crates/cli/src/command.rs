//! Command trait for arsync CLI
//!
//! This module defines the `Command` trait that every configuration-backed
//! arsync command implements.

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all arsync commands that need the loaded configuration
///
/// Commands can specify their return type via the `Output` associated type.
/// Most commands return `()`; the sync command returns its result set.
///
/// # Example
///
/// ```rust,ignore
/// use crate::command::Command;
/// use crate::common::RuntimeContext;
/// use crate::error::Result;
///
/// pub struct CountCommand;
///
/// impl Command for CountCommand {
///     type Output = usize;
///
///     fn execute(&self, context: &RuntimeContext) -> Result<usize> {
///         Ok(context.store.list_jobs().len())
///     }
/// }
/// ```
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
