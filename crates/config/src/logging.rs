//! Logging configuration for the arsync CLI
//!
//! Terminal logs go to stderr so stdout carries only command output. An
//! optional log file receives everything at debug level.

use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crate targets that log under the arsync filter
const TARGETS: [&str; 4] = ["arsync", "arsync_core", "arsync_config", "arsync_engine"];

/// Build the default filter directive for `level`
fn default_directive(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
/// * `log_file` - Optional path to append logs to
///
/// `RUST_LOG` overrides the terminal filter.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or the global
/// subscriber cannot be installed for a reason other than an earlier `init`.
///
/// # Examples
/// ```ignore
/// // Basic usage with info level
/// init(false, None)?;
///
/// // Verbose mode, also writing to a file
/// init(true, Some(Path::new("arsync.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> std::io::Result<()> {
    let level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true);

    // No timestamps in normal mode
    let stderr_layer = if verbose {
        stderr_layer.with_filter(env_filter).boxed()
    } else {
        stderr_layer.without_time().with_filter(env_filter).boxed()
    };

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(EnvFilter::new(default_directive("debug"))),
            )
        }
        None => None,
    };

    match tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        Ok(()) => Ok(()),
        // A second init (e.g. in tests) keeps the first subscriber
        Err(_) if tracing::dispatcher::has_been_set() => {
            tracing::debug!("Logging already initialized, keeping existing subscriber");
            Ok(())
        }
        Err(e) => Err(std::io::Error::other(e)),
    }
}
