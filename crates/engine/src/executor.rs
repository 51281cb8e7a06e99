//! Single sync execution
//!
//! Runs one sync as an external process and folds every outcome into a
//! [`JobResult`]. Errors never escape: a failing sync must not stop the others.

use crate::command::CommandBuilder;
use crate::error::{Error, Result};
use arsync_config::ConfigStore;

/// Outcome of one sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    /// Whether the transfer completed with a zero exit status
    pub success: bool,
    /// Captured stdout on success, a failure description otherwise
    pub output: String,
}

impl JobResult {
    /// Create a successful result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    /// Create a failed result
    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

/// Runs syncs from a configuration with a shared command builder
///
/// Holds only shared references, so one executor can serve concurrent jobs.
#[derive(Debug, Clone, Copy)]
pub struct JobExecutor<'a> {
    store: &'a ConfigStore,
    builder: &'a CommandBuilder,
}

impl<'a> JobExecutor<'a> {
    /// Create an executor
    #[must_use]
    pub fn new(store: &'a ConfigStore, builder: &'a CommandBuilder) -> Self {
        Self { store, builder }
    }

    /// Run a sync to completion
    ///
    /// Non-zero exit yields `"<tool> failed: <stderr>"`; any other failure
    /// (resolution, password, spawn) yields `"Error running sync '<name>': <error>"`.
    #[tracing::instrument(skip(self))]
    pub fn run(&self, name: &str) -> JobResult {
        let start = std::time::Instant::now();

        let result = match self.execute(name) {
            Ok(stdout) => JobResult::success(stdout),
            Err(e @ Error::ProcessExecution { .. }) => JobResult::failure(e.to_string()),
            Err(e) => JobResult::failure(format!("Error running sync '{name}': {e}")),
        };

        let elapsed_ms = start.elapsed().as_millis();
        if result.success {
            tracing::debug!(elapsed_ms, "Sync completed successfully");
        } else {
            tracing::debug!(elapsed_ms, output = %result.output, "Sync failed");
        }

        result
    }

    fn execute(&self, name: &str) -> Result<String> {
        let spec = self.store.resolve_job(name)?;
        let invocation = self.builder.build(&spec, false)?;

        tracing::info!("Running sync '{name}': {invocation}");

        let argv = invocation.argv();
        let output = duct::cmd(argv[0], argv[1..].iter().copied())
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| Error::ProcessSpawn {
                tool: argv[0].to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::ProcessExecution {
                tool: invocation.tool().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn store() -> ConfigStore {
        ConfigStore::from_yaml_str(
            r#"
sync:
  ok:
    src: /x
    dest: /y
  remote:
    src: nas:/srv
    dest: /y
  incomplete:
    src: /x
"#,
            "test",
        )
        .unwrap()
    }

    /// Write an executable shell script standing in for the transfer tool
    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("tool.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_success_captures_stdout() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("echo");
        let executor = JobExecutor::new(&store, &builder);

        let result = executor.run("ok");

        assert!(result.success);
        assert_eq!(result.output, "-avPh /x /y\n");
    }

    #[test]
    fn test_non_zero_exit_reports_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let tool = script(temp_dir.path(), "echo 'disk full' >&2\nexit 23");
        let store = store();
        let builder = CommandBuilder::new().transfer_tool(tool.to_str().unwrap());
        let executor = JobExecutor::new(&store, &builder);

        let result = executor.run("ok");

        assert!(!result.success);
        assert_eq!(result.output, format!("{} failed: disk full", tool.display()));
    }

    #[test]
    fn test_false_tool_fails() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("false");
        let result = JobExecutor::new(&store, &builder).run("ok");

        assert!(!result.success);
        assert!(result.output.starts_with("false failed:"));
    }

    #[test]
    fn test_missing_tool_is_spawn_failure() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("definitely-not-a-real-tool-arsync");
        let result = JobExecutor::new(&store, &builder).run("ok");

        assert!(!result.success);
        assert!(result.output.starts_with("Error running sync 'ok': "));
        assert!(result.output.contains("definitely-not-a-real-tool-arsync"));
    }

    #[test]
    fn test_unknown_sync_captured() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("echo");
        let result = JobExecutor::new(&store, &builder).run("missing");

        assert!(!result.success);
        assert!(result.output.starts_with("Error running sync 'missing': "));
        assert!(result.output.contains("Available syncs: ok, remote, incomplete"));
    }

    #[test]
    fn test_missing_field_captured() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("echo");
        let result = JobExecutor::new(&store, &builder).run("incomplete");

        assert!(!result.success);
        assert!(result.output.contains("dest"));
    }

    #[test]
    fn test_credential_failure_captured() {
        let temp_dir = TempDir::new().unwrap();
        let store = store();
        let builder = CommandBuilder::new()
            .transfer_tool("echo")
            .ssh_key(temp_dir.path().join("no_key"));
        let result = JobExecutor::new(&store, &builder).run("remote");

        assert!(!result.success);
        assert!(result.output.starts_with("Error running sync 'remote': "));
        assert!(result.output.contains("Failed to obtain password for nas"));
    }

    #[test]
    fn test_wrapped_invocation_runs_wrapper() {
        let temp_dir = TempDir::new().unwrap();
        // Stand-in wrapper prints its arguments
        let wrapper = script(temp_dir.path(), "echo \"$@\"");
        let store = store();
        let builder = CommandBuilder::new()
            .transfer_tool("rsync")
            .credential_tool(wrapper.to_str().unwrap())
            .ssh_key(temp_dir.path().join("no_key"))
            .secret_prompt(|_: &str| -> arsync_core::Result<secrecy::SecretString> {
                Ok(secrecy::SecretString::from("pw".to_string()))
            });

        let result = JobExecutor::new(&store, &builder).run("remote");

        assert!(result.success, "{}", result.output);
        assert_eq!(result.output, "-p pw rsync -avPh nas:/srv /y\n");
    }
}
