//! Common types shared across CLI commands

use arsync_config::ConfigStore;
use arsync_engine::{CommandBuilder, JobExecutor};
use std::sync::Arc;

use crate::prompt::TerminalPrompt;

/// Runtime context for CLI commands
///
/// Holds the loaded configuration and the command builder every command
/// shares. Both are read-only once built.
///
/// # Examples
///
/// ```no_run
/// use arsync::common::RuntimeContext;
/// use arsync_config::ConfigStore;
///
/// let store = ConfigStore::load("/home/user/.config/arsync.conf")?;
/// let context = RuntimeContext::new(store);
/// let result = context.executor().run("documents");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Shared configuration (uses Arc to avoid cloning)
    pub store: Arc<ConfigStore>,
    /// Builder used for every transfer
    pub builder: CommandBuilder,
}

impl RuntimeContext {
    /// Create a context that prompts on the terminal for passwords
    #[must_use]
    pub fn new(store: ConfigStore) -> Self {
        Self::with_builder(store, CommandBuilder::new().secret_prompt(TerminalPrompt::new()))
    }

    /// Create a context with a custom command builder
    #[must_use]
    pub fn with_builder(store: ConfigStore, builder: CommandBuilder) -> Self {
        Self {
            store: Arc::new(store),
            builder,
        }
    }

    /// Executor over this context's configuration and builder
    #[must_use]
    pub fn executor(&self) -> JobExecutor<'_> {
        JobExecutor::new(&self.store, &self.builder)
    }
}
