//! Result reporting for completed syncs

use arsync_engine::{JobResult, ResultSet};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Counts of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    succeeded: usize,
    total: usize,
}

impl SyncSummary {
    /// Count successes in a result set
    #[must_use]
    pub fn from_results(results: &ResultSet) -> Self {
        Self {
            succeeded: results.values().filter(|r| r.success).count(),
            total: results.len(),
        }
    }

    /// Number of successful syncs
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of syncs run
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// True when no sync failed
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }

    /// `Completed: <succeeded>/<total> syncs successful`
    #[must_use]
    pub fn completion_line(&self) -> String {
        format!(
            "Completed: {}/{} syncs successful",
            self.succeeded, self.total
        )
    }
}

/// Report line for one sync, without colors
#[must_use]
pub fn result_line(name: &str, result: &JobResult) -> String {
    if result.success {
        format!("✓ {name}: Success")
    } else {
        format!("✗ {name}: Failed - {}", result.output)
    }
}

/// Print the report to stdout
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn print_report(results: &ResultSet) -> io::Result<SyncSummary> {
    write_report(results, &mut io::stdout().lock())
}

/// Write one line per sync in result order, then the totals
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn write_report(results: &ResultSet, out: &mut impl Write) -> io::Result<SyncSummary> {
    for (name, result) in results {
        let line = result_line(name, result);
        if result.success {
            writeln!(out, "{}", line.green())?;
        } else {
            writeln!(out, "{}", line.red())?;
        }
    }

    let summary = SyncSummary::from_results(results);
    writeln!(out, "\n{}", summary.completion_line().bold())?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn results() -> ResultSet {
        let mut results = ResultSet::new();
        results.insert("docs".to_string(), JobResult::success("sent 10 bytes"));
        results.insert(
            "photos".to_string(),
            JobResult::failure("rsync failed: connection refused"),
        );
        results.insert("music".to_string(), JobResult::success(""));
        results
    }

    #[test]
    fn test_summary_counts() {
        let summary = SyncSummary::from_results(&results());
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.total(), 3);
        assert!(!summary.all_succeeded());
        assert_eq!(summary.completion_line(), "Completed: 2/3 syncs successful");
    }

    #[test]
    fn test_empty_results_all_succeeded() {
        let summary = SyncSummary::from_results(&ResultSet::new());
        assert!(summary.all_succeeded());
        assert_eq!(summary.completion_line(), "Completed: 0/0 syncs successful");
    }

    #[test]
    fn test_result_lines() {
        let results = results();
        assert_eq!(result_line("docs", &results["docs"]), "✓ docs: Success");
        assert_eq!(
            result_line("photos", &results["photos"]),
            "✗ photos: Failed - rsync failed: connection refused"
        );
    }

    #[test]
    fn test_write_report_output() {
        let mut out = Vec::new();
        let summary = write_report(&results(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(summary.succeeded(), 2);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("✓ docs: Success"));
        assert!(lines[1].contains("✗ photos: Failed - rsync failed: connection refused"));
        assert!(lines[2].contains("✓ music: Success"));
        assert_eq!(lines[3], "");
        assert!(lines[4].contains("Completed: 2/3 syncs successful"));
    }
}
