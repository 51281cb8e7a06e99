//! Path normalization for transfer endpoints
//!
//! A transfer endpoint is either a local path or a remote `host:path` reference.
//! Remote references are handed to the transfer tool verbatim; local paths are
//! normalized first:
//!
//! 1. `~/rest` (or a bare `~`) is expanded to the home directory
//! 2. relative paths are joined onto the current working directory
//! 3. stray `/~/` segments embedded in an absolute path are removed
//!
//! Without a known home directory a leading `~` is kept literally, the way a
//! shell would, and the repair step is skipped for that path.
//!
//! # Examples
//!
//! ```
//! use arsync_core::path::{is_remote, normalize, remote_host};
//!
//! assert_eq!(normalize("/home/u/~/data"), "/home/u/data");
//! assert!(is_remote("backup.lan:/srv/data"));
//! assert_eq!(remote_host("backup.lan:/srv/data"), Some("backup.lan"));
//! ```

use std::borrow::Cow;
use std::path::Path;

/// Check whether an endpoint is a remote `host:path` reference
///
/// Detection is purely textual: any `:` makes the endpoint remote.
#[must_use]
pub fn is_remote(path: &str) -> bool {
    path.contains(':')
}

/// Host portion of a remote endpoint (the text before the first `:`)
///
/// Returns `None` for local paths.
#[must_use]
pub fn remote_host(path: &str) -> Option<&str> {
    path.split_once(':').map(|(host, _)| host)
}

/// Normalize a local path
///
/// Never fails: text that none of the rules apply to passes through unchanged.
/// Must not be called on remote endpoints (see [`is_remote`]).
///
/// The result is stable under repeated application:
/// `normalize(&normalize(p)) == normalize(p)`.
#[must_use]
pub fn normalize(path: &str) -> String {
    let home = dirs::home_dir();
    let cwd = std::env::current_dir().ok();
    normalize_with(path, home.as_deref(), cwd.as_deref())
}

/// [`normalize`] with an explicit home directory and working directory
#[must_use]
pub fn normalize_with(path: &str, home: Option<&Path>, cwd: Option<&Path>) -> String {
    let literal_tilde = home.is_none() && (path == "~" || path.starts_with("~/"));
    let expanded = expand_tilde(path, home);
    let absolute = absolutize(&expanded, cwd);
    if literal_tilde {
        return absolute.into_owned();
    }
    repair_tilde_segments(&absolute).into_owned()
}

fn expand_tilde<'a>(path: &'a str, home: Option<&Path>) -> Cow<'a, str> {
    let Some(home) = home else {
        return Cow::Borrowed(path);
    };
    let home = home.to_string_lossy();

    if let Some(rest) = path.strip_prefix("~/") {
        Cow::Owned(format!("{}/{rest}", home.trim_end_matches('/')))
    } else if path == "~" {
        Cow::Owned(home.into_owned())
    } else {
        Cow::Borrowed(path)
    }
}

/// Join a relative path onto `cwd` and collapse `.` and `..` segments.
/// Absolute paths are returned as-is so a meaningful trailing `/` survives.
fn absolutize<'a>(path: &'a str, cwd: Option<&Path>) -> Cow<'a, str> {
    if path.starts_with('/') {
        return Cow::Borrowed(path);
    }
    let Some(cwd) = cwd else {
        return Cow::Borrowed(path);
    };

    let joined = format!("{}/{path}", cwd.to_string_lossy().trim_end_matches('/'));
    Cow::Owned(collapse(&joined, path.ends_with('/')))
}

/// Lexically resolve `.` and `..`; `trailing_slash` comes from the authored path
fn collapse(path: &str, trailing_slash: bool) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut collapsed = format!("/{}", segments.join("/"));
    if trailing_slash && collapsed != "/" {
        collapsed.push('/');
    }
    collapsed
}

/// Remove `~/` segments embedded in an absolute path (`/home/u/~/data` → `/home/u/data`)
fn repair_tilde_segments(path: &str) -> Cow<'_, str> {
    if !path.starts_with('/') || !path.contains("/~/") {
        return Cow::Borrowed(path);
    }

    let mut repaired = path.replace("/~/", "/");
    // `/~/~/` only loses one segment per pass
    while repaired.contains("/~/") {
        repaired = repaired.replace("/~/", "/");
    }
    Cow::Owned(repaired)
}
