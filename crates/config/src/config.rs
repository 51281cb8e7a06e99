//! Configuration management
//!
//! This module loads the sync declarations and resolves them into concrete
//! transfer specs.
//!
//! ```yaml
//! variables:
//!   - DISK=backup
//!   - HOST="nas.local"
//! sync:
//!   documents:
//!     src: ~/Documents/
//!     dest: /mnt/${DISK}/documents
//!   photos:
//!     src: ${HOST}:/srv/photos/
//!     dest: ~/Pictures/nas
//! config:
//!   rsync_flags: -avPh --delete
//! ```

use crate::error::{Error, Result};
use crate::variables::{VariableMap, parse_variables, substitute};
use arsync_core::path::{is_remote, normalize};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Flags passed to the transfer tool when `config.rsync_flags` is not set
pub const DEFAULT_RSYNC_FLAGS: &str = "-avPh";

/// A sync declaration as authored in the file
///
/// Fields stay untyped so that one malformed sync fails on its own when it is
/// resolved instead of rejecting the whole file.
#[derive(Debug, Clone)]
struct JobDeclaration {
    src: Option<Value>,
    dest: Option<Value>,
}

impl JobDeclaration {
    fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .as_mapping()
                .and_then(|mapping| mapping.get(key))
                .filter(|v| !v.is_null())
                .cloned()
        };
        Self {
            src: field("src"),
            dest: field("dest"),
        }
    }
}

/// Global settings section (`config:`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Flag string handed to the transfer tool as a single argument
    #[serde(default)]
    pub rsync_flags: Option<String>,
}

/// On-disk layout of the configuration file
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    variables: Option<Value>,

    sync: Mapping,

    #[serde(default)]
    config: Option<GlobalConfig>,
}

/// Sync name for a mapping key; scalar keys such as `2024:` are stringified
fn job_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sync field as text, or why it cannot be used
fn text_field<'d>(
    name: &str,
    field: &'static str,
    value: Option<&'d Value>,
) -> Result<&'d str> {
    let value = value.ok_or_else(|| Error::MissingField {
        name: name.to_string(),
        field,
    })?;
    value.as_str().ok_or_else(|| Error::InvalidField {
        name: name.to_string(),
        field,
    })
}

/// A sync with its endpoints normalized and variables substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJobSpec {
    /// Sync name
    pub name: String,
    /// Resolved source
    pub src: String,
    /// Resolved destination
    pub dest: String,
    /// Effective transfer flags
    pub flags: String,
    /// Variables referenced by `src`/`dest` that have no value
    pub undefined: Vec<String>,
}

/// Loaded, validated configuration
///
/// Read-only after loading, so a single instance can be shared by concurrent jobs.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    variables: VariableMap,
    jobs: IndexMap<String, JobDeclaration>,
    global: GlobalConfig,
}

impl ConfigStore {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist, [`Error::Parse`]
    /// if it is not valid UTF-8 YAML and [`Error::Schema`] if it lacks a `sync`
    /// section.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let origin = path.display().to_string();
        let tree: Value = serde_yaml::from_slice(&content).map_err(|source| Error::Parse {
            origin: origin.clone(),
            source,
        })?;
        let mut store = Self::from_tree(tree, &origin)?;
        store.path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            syncs = store.jobs.len(),
            variables = store.variables.len(),
            "Loaded configuration"
        );

        Ok(store)
    }

    /// Load configuration from a YAML string
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed YAML and [`Error::Schema`] when
    /// the `sync` section is missing or a section has the wrong shape.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self> {
        let tree: Value = serde_yaml::from_str(content).map_err(|source| Error::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_tree(tree, origin)
    }

    fn from_tree(tree: Value, origin: &str) -> Result<Self> {
        let has_sync = tree
            .as_mapping()
            .and_then(|mapping| mapping.get("sync"))
            .is_some_and(|sync| !sync.is_null());
        if !has_sync {
            return Err(Error::schema(
                origin,
                "Config file must contain a 'sync' section",
            ));
        }

        let raw: RawConfig =
            serde_yaml::from_value(tree).map_err(|e| Error::schema(origin, e.to_string()))?;

        let variables = match &raw.variables {
            Some(Value::Sequence(entries)) => parse_variables(entries),
            Some(Value::Null) | None => VariableMap::new(),
            Some(other) => {
                tracing::debug!("Ignoring 'variables' section that is not a list: {:?}", other);
                VariableMap::new()
            }
        };

        let mut jobs = IndexMap::new();
        for (key, value) in &raw.sync {
            match job_name(key) {
                Some(name) => {
                    jobs.insert(name, JobDeclaration::from_value(value));
                }
                None => tracing::warn!("Skipping sync with unsupported name: {:?}", key),
            }
        }

        Ok(Self {
            path: None,
            variables,
            jobs,
            global: raw.config.unwrap_or_default(),
        })
    }

    /// Path the configuration was loaded from, if it came from a file
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Variables declared in the `variables` section
    #[must_use]
    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Sync names in declaration order
    #[must_use]
    pub fn list_jobs(&self) -> Vec<String> {
        self.jobs.keys().cloned().collect()
    }

    /// Flags for the transfer tool: `config.rsync_flags` or [`DEFAULT_RSYNC_FLAGS`]
    #[must_use]
    pub fn effective_flags(&self) -> &str {
        self.global
            .rsync_flags
            .as_deref()
            .unwrap_or(DEFAULT_RSYNC_FLAGS)
    }

    /// Resolve a sync into concrete endpoints
    ///
    /// Local endpoints are normalized first, then variables are substituted in
    /// both local and remote endpoints. Undefined variables are logged and
    /// reported in [`ResolvedJobSpec::undefined`] but never fail resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSync`] (listing every configured sync) if
    /// `name` is not declared, [`Error::MissingField`] if the declaration
    /// lacks `src` or `dest` and [`Error::InvalidField`] if either is not a string.
    #[tracing::instrument(skip(self))]
    pub fn resolve_job(&self, name: &str) -> Result<ResolvedJobSpec> {
        let declaration = self.jobs.get(name).ok_or_else(|| Error::UnknownSync {
            name: name.to_string(),
            available: self.list_jobs(),
        })?;

        let src = text_field(name, "src", declaration.src.as_ref())?;
        let dest = text_field(name, "dest", declaration.dest.as_ref())?;

        let mut undefined = Vec::new();
        let src = self.resolve_endpoint(src, &mut undefined);
        let dest = self.resolve_endpoint(dest, &mut undefined);

        for variable in &undefined {
            tracing::warn!("Variable ${{{variable}}} not defined");
        }

        tracing::debug!(src = %src, dest = %dest, "Resolved sync");

        Ok(ResolvedJobSpec {
            name: name.to_string(),
            src,
            dest,
            flags: self.effective_flags().to_string(),
            undefined,
        })
    }

    /// Normalize (local only) then substitute a single endpoint
    fn resolve_endpoint(&self, raw: &str, undefined: &mut Vec<String>) -> String {
        // Remote detection looks at the raw text, before any substitution
        let normalized = if is_remote(raw) {
            Cow::Borrowed(raw)
        } else {
            Cow::Owned(normalize(raw))
        };

        let substitution = substitute(&normalized, &self.variables);
        for name in substitution.undefined {
            if !undefined.contains(&name) {
                undefined.push(name);
            }
        }
        substitution.text
    }
}
