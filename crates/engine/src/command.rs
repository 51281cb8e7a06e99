//! Transfer command construction
//!
//! Decides whether a sync needs a password and produces the exact argv of the
//! external transfer process.

use crate::Result;
use arsync_config::ResolvedJobSpec;
use arsync_core::path::{is_remote, remote_host};
use arsync_core::{NoPrompt, SecretPrompt};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default transfer tool
pub const DEFAULT_TRANSFER_TOOL: &str = "rsync";

/// Default credential wrapper, invoked as `<tool> -p <password> <transfer...>`
pub const DEFAULT_CREDENTIAL_TOOL: &str = "sshpass";

/// Placeholder shown instead of the password
const REDACTED: &str = "********";

/// Credential wrapper prepended to the transfer argv
struct CredentialWrapper {
    tool: String,
    secret: SecretString,
}

/// A fully built external invocation
///
/// `Display` prints the command line with the password redacted; [`argv`]
/// exposes it for spawning.
///
/// [`argv`]: Invocation::argv
pub struct Invocation {
    /// `[tool, flags, src, dest]`
    transfer: Vec<String>,
    wrapper: Option<CredentialWrapper>,
}

impl Invocation {
    fn plain(tool: &str, spec: &ResolvedJobSpec) -> Self {
        Self {
            transfer: vec![
                tool.to_string(),
                spec.flags.clone(),
                spec.src.clone(),
                spec.dest.clone(),
            ],
            wrapper: None,
        }
    }

    /// Name of the transfer tool (`rsync` by default)
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.transfer[0]
    }

    /// Whether the transfer is wrapped by the credential tool
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.wrapper.is_some()
    }

    /// Full argument vector, password included
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        let mut argv = Vec::with_capacity(self.transfer.len() + 3);
        if let Some(wrapper) = &self.wrapper {
            argv.push(wrapper.tool.as_str());
            argv.push("-p");
            argv.push(wrapper.secret.expose_secret());
        }
        argv.extend(self.transfer.iter().map(String::as_str));
        argv
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(wrapper) = &self.wrapper {
            write!(f, "{} -p {REDACTED} ", wrapper.tool)?;
        }
        write!(f, "{}", self.transfer.join(" "))
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("command", &self.to_string())
            .finish()
    }
}

/// Builds [`Invocation`]s from resolved sync specs
///
/// # Examples
///
/// ```
/// use arsync_config::ConfigStore;
/// use arsync_engine::CommandBuilder;
///
/// let store = ConfigStore::from_yaml_str("sync: {a: {src: /x, dest: /y}}", "inline").unwrap();
/// let spec = store.resolve_job("a").unwrap();
///
/// let invocation = CommandBuilder::new().build(&spec, false).unwrap();
/// assert_eq!(invocation.argv(), vec!["rsync", "-avPh", "/x", "/y"]);
/// ```
#[derive(Clone)]
pub struct CommandBuilder {
    transfer_tool: String,
    credential_tool: String,
    ssh_key: Option<PathBuf>,
    prompt: Arc<dyn SecretPrompt>,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("transfer_tool", &self.transfer_tool)
            .field("credential_tool", &self.credential_tool)
            .field("ssh_key", &self.ssh_key)
            .finish_non_exhaustive()
    }
}

impl CommandBuilder {
    /// Create a builder with default tools, `~/.ssh/id_rsa` as the key and no
    /// interactive prompt
    #[must_use]
    pub fn new() -> Self {
        Self {
            transfer_tool: DEFAULT_TRANSFER_TOOL.to_string(),
            credential_tool: DEFAULT_CREDENTIAL_TOOL.to_string(),
            ssh_key: dirs::home_dir().map(|home| home.join(".ssh").join("id_rsa")),
            prompt: Arc::new(NoPrompt),
        }
    }

    /// Set the transfer tool
    #[must_use]
    pub fn transfer_tool(mut self, tool: impl Into<String>) -> Self {
        self.transfer_tool = tool.into();
        self
    }

    /// Set the credential wrapper tool
    #[must_use]
    pub fn credential_tool(mut self, tool: impl Into<String>) -> Self {
        self.credential_tool = tool.into();
        self
    }

    /// Set the SSH key whose presence makes a password unnecessary
    #[must_use]
    pub fn ssh_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_key = Some(path.into());
        self
    }

    /// Set the source of passwords for remote sources
    #[must_use]
    pub fn secret_prompt(mut self, prompt: impl SecretPrompt + 'static) -> Self {
        self.prompt = Arc::new(prompt);
        self
    }

    /// Name of the configured transfer tool
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.transfer_tool
    }

    fn has_ssh_key(&self) -> bool {
        self.ssh_key.as_deref().is_some_and(Path::exists)
    }

    /// Build the invocation for a resolved sync
    ///
    /// A password is requested only for a remote source when no SSH key is
    /// present and this is not a dry run. A remote destination never prompts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`](crate::Error::Credential) if the prompt
    /// fails.
    pub fn build(&self, spec: &ResolvedJobSpec, dry_run: bool) -> Result<Invocation> {
        let mut invocation = Invocation::plain(&self.transfer_tool, spec);

        if dry_run || !is_remote(&spec.src) || self.has_ssh_key() {
            return Ok(invocation);
        }

        let host = remote_host(&spec.src).unwrap_or_default();
        tracing::debug!(host, "No SSH key found, requesting password");

        let secret = self.prompt.obtain_secret(host)?;
        invocation.wrapper = Some(CredentialWrapper {
            tool: self.credential_tool.clone(),
            secret,
        });

        Ok(invocation)
    }
}
