//! Refresh command implementation
//!
//! Completion files are regenerated by the shell wrapper around `arsync`;
//! this only confirms the request.

/// Refresh command
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshCommand;

impl RefreshCommand {
    /// Print the refresh confirmation
    pub fn run(&self) {
        println!("Refreshing bash completion...");
        println!("Bash completion refreshed.");
    }
}
