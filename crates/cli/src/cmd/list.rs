//! List command implementation
//!
//! Prints configured sync names, one per line, in declaration order.

use arsync_config::ConfigStore;
use std::io::{self, Write};

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// List command
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCommand;

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        write_names(&context.store, &mut io::stdout().lock())?;
        Ok(())
    }
}

/// Write every sync name on its own line
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_names(store: &ConfigStore, out: &mut impl Write) -> io::Result<()> {
    for name in store.list_jobs() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_bare_names_in_declaration_order() {
        let store = ConfigStore::from_yaml_str(
            "sync:\n  photos: {src: /a, dest: /b}\n  2024: {src: /c, dest: /d}\n",
            "test",
        )
        .unwrap();

        let mut out = Vec::new();
        write_names(&store, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "photos\n2024\n");
    }
}
