//! arsync CLI library
//!
//! This library contains all the CLI logic for arsync, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod prompt;
pub mod report;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use arsync_config::ConfigStore;
use command::Command;
use common::RuntimeContext;
use error::CommandError;

/// Reserved first positional argument handled by the shell-completion wrapper
pub const REFRESH: &str = "refresh";

/// arsync - run rsync jobs declared in a YAML file
#[derive(Debug, Parser)]
#[command(name = "arsync")]
#[command(about = "Enhanced rsync with YAML configuration")]
#[command(version)]
#[command(after_help = "Examples:
  arsync                    # Run all syncs
  arsync debian             # Run only 'debian' sync
  arsync debian ubuntu      # Run multiple syncs
  arsync --list             # List available syncs
  arsync --config /path/to/config.conf  # Use custom config file
  arsync refresh            # Refresh bash completion")]
pub struct Cli {
    /// Sync names to run, or "refresh" to update bash completion (default: run all)
    #[arg(value_name = "SYNCS")]
    pub syncs: Vec<String>,

    /// Path to the config file (default: ~/.config/arsync.conf)
    #[arg(short, long, env = "ARSYNC_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// List available sync operations
    #[arg(short, long)]
    pub list: bool,

    /// Run syncs sequentially instead of in parallel
    #[arg(long)]
    pub no_parallel: bool,

    /// Show what would be done without running rsync
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "ARSYNC_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Overall outcome of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything requested completed
    Success,
    /// At least one sync failed
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Resolve the configuration file: `--config`/`ARSYNC_CONFIG`, else the XDG default
fn config_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.config {
        return Ok(path.clone());
    }
    let path = arsync_config::default_config_file().ok_or(CommandError::NoConfigDir)?;
    Ok(path)
}

/// Main entry point for the CLI
///
/// # Errors
///
/// Returns an error if:
/// - The log file cannot be opened
/// - Configuration loading fails
/// - No syncs are configured
pub fn run(cli: Cli) -> Result<Status> {
    // Initialize logging based on verbosity
    arsync_config::logging::init(cli.verbose, cli.log_file.as_deref())
        .map_err(CommandError::LogFile)?;

    // Handled by the shell wrapper; never touches the configuration
    if cli.syncs.first().map(String::as_str) == Some(REFRESH) {
        cmd::refresh::RefreshCommand.run();
        return Ok(Status::Success);
    }

    let path = config_path(&cli)?;
    let store = ConfigStore::load(&path).map_err(CommandError::from)?;
    let context = RuntimeContext::new(store);

    if cli.list {
        cmd::list::ListCommand.execute(&context)?;
        return Ok(Status::Success);
    }

    let names = if cli.syncs.is_empty() {
        context.store.list_jobs()
    } else {
        cli.syncs
    };

    if names.is_empty() {
        return Err(CommandError::NoSyncsDefined.into());
    }

    if cli.dry_run {
        cmd::dry_run::DryRunCommand { names }.execute(&context)?;
        return Ok(Status::Success);
    }

    let results = cmd::sync::SyncCommand {
        names,
        parallel: !cli.no_parallel,
    }
    .execute(&context)?;

    let summary = report::print_report(&results).map_err(CommandError::from)?;
    Ok(if summary.all_succeeded() {
        Status::Success
    } else {
        Status::Failure
    })
}
