//! Parallel execution of many syncs
//!
//! Fan-out/fan-in: every sync runs as an independent task returning its own
//! `(name, JobResult)` pair, and the result set is assembled after all tasks
//! have joined.

use crate::executor::{JobExecutor, JobResult};
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;

/// Results keyed by sync name, in request order
pub type ResultSet = IndexMap<String, JobResult>;

/// Runs a set of syncs concurrently or one after another
#[derive(Debug, Clone, Copy)]
pub struct ParallelRunner<'a> {
    executor: JobExecutor<'a>,
}

impl<'a> ParallelRunner<'a> {
    /// Create a runner over an executor
    #[must_use]
    pub fn new(executor: JobExecutor<'a>) -> Self {
        Self { executor }
    }

    /// Run every named sync and collect the results
    ///
    /// Duplicate names are run once. With `parallel` set and more than one
    /// distinct name, each sync gets its own thread; otherwise they run in the
    /// given order. The result set lists names in request order either way.
    pub fn run_all<S: AsRef<str>>(&self, names: &[S], parallel: bool) -> ResultSet {
        let names: Vec<&str> = names
            .iter()
            .map(AsRef::<str>::as_ref)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        let results = if parallel && names.len() > 1 {
            self.run_parallel(&names)
        } else {
            self.run_serial(&names)
        };

        results
            .into_iter()
            .map(|(name, result)| (name.to_string(), result))
            .collect()
    }

    fn run_serial<'n>(&self, names: &[&'n str]) -> Vec<(&'n str, JobResult)> {
        tracing::debug!(count = names.len(), "Running syncs sequentially");

        names
            .iter()
            .map(|&name| (name, self.executor.run(name)))
            .collect()
    }

    fn run_parallel<'n>(&self, names: &[&'n str]) -> Vec<(&'n str, JobResult)> {
        // One thread per sync: transfers block on I/O, not CPU
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(names.len())
            .thread_name(|i| format!("arsync-{i}"))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("Failed to create thread pool, running sequentially: {e}");
                return self.run_serial(names);
            }
        };

        tracing::debug!(count = names.len(), "Running syncs in parallel");

        pool.install(|| {
            names
                .par_iter()
                .map(|&name| (name, self.executor.run(name)))
                .collect()
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::CommandBuilder;
    use arsync_config::ConfigStore;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn store() -> ConfigStore {
        ConfigStore::from_yaml_str(
            r#"
sync:
  one: {src: /a, dest: /b}
  two: {src: /c, dest: /d}
  three: {src: /e, dest: /f}
"#,
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_parallel_matches_serial() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("echo");
        let runner = ParallelRunner::new(JobExecutor::new(&store, &builder));
        let names = ["three", "one", "missing", "two"];

        let parallel = runner.run_all(&names, true);
        let serial = runner.run_all(&names, false);

        assert_eq!(parallel, serial);
        assert_eq!(
            parallel.keys().collect::<Vec<_>>(),
            vec!["three", "one", "missing", "two"]
        );
        assert!(parallel["one"].success);
        assert_eq!(parallel["one"].output, "-avPh /a /b\n");
        assert!(!parallel["missing"].success);
    }

    #[test]
    fn test_parallel_syncs_overlap() {
        // Each stand-in transfer marks its arrival, then waits until every
        // sync has arrived. Run one after another, the first would time out.
        let temp_dir = TempDir::new().unwrap();
        let marks = temp_dir.path().join("marks");
        std::fs::create_dir(&marks).unwrap();
        let tool = temp_dir.path().join("barrier.sh");
        std::fs::write(
            &tool,
            format!(
                "#!/bin/sh\n\
                 touch \"{marks}/$(basename \"$3\")\"\n\
                 i=0\n\
                 while [ \"$(ls \"{marks}\" | wc -l)\" -lt 3 ]; do\n\
                 i=$((i + 1))\n\
                 [ \"$i\" -gt 100 ] && exit 1\n\
                 sleep 0.1\n\
                 done\n",
                marks = marks.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let store = store();
        let builder = CommandBuilder::new().transfer_tool(tool.to_str().unwrap());
        let runner = ParallelRunner::new(JobExecutor::new(&store, &builder));

        let results = runner.run_all(&["one", "two", "three"], true);

        assert_eq!(results.len(), 3);
        for (name, result) in &results {
            assert!(result.success, "{name}: {}", result.output);
        }
    }

    #[test]
    fn test_duplicate_names_run_once() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("echo");
        let runner = ParallelRunner::new(JobExecutor::new(&store, &builder));

        let results = runner.run_all(&["two", "one", "two"], true);

        assert_eq!(results.len(), 2);
        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["two", "one"]);
    }

    #[test]
    fn test_single_name_parallel_flag() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("echo");
        let runner = ParallelRunner::new(JobExecutor::new(&store, &builder));

        let results = runner.run_all(&["one"], true);

        assert_eq!(results.len(), 1);
        assert!(results["one"].success);
    }

    #[test]
    fn test_empty_request() {
        let store = store();
        let builder = CommandBuilder::new();
        let runner = ParallelRunner::new(JobExecutor::new(&store, &builder));

        let results = runner.run_all::<&str>(&[], true);
        assert!(results.is_empty());
    }

    #[test]
    fn test_all_configured_jobs() {
        let store = store();
        let builder = CommandBuilder::new().transfer_tool("false");
        let runner = ParallelRunner::new(JobExecutor::new(&store, &builder));

        let results = runner.run_all(&store.list_jobs(), true);

        assert_eq!(results.len(), 3);
        assert!(results.values().all(|r| !r.success));
    }
}
