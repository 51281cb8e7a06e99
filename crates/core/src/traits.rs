//! Capability traits for arsync components
//!
//! Interactive side effects are hidden behind narrow traits so that the
//! components which need them can be driven deterministically in tests.

use crate::Result;
use secrecy::SecretString;

/// Source of secrets for remote hosts
///
/// Implemented by the CLI with an interactive terminal prompt. Implementations
/// must be shareable across threads because transfers may run concurrently.
///
/// # Examples
///
/// ```
/// use arsync_core::{Result, SecretPrompt};
/// use secrecy::{ExposeSecret, SecretString};
///
/// struct Fixed;
///
/// impl SecretPrompt for Fixed {
///     fn obtain_secret(&self, _host: &str) -> Result<SecretString> {
///         Ok(SecretString::from("hunter2".to_string()))
///     }
/// }
///
/// assert_eq!(Fixed.obtain_secret("nas").unwrap().expose_secret(), "hunter2");
/// ```
pub trait SecretPrompt: Send + Sync {
    /// Synchronously obtain the secret for `host`
    fn obtain_secret(&self, host: &str) -> Result<SecretString>;
}

/// Implement `SecretPrompt` for closures
impl<F> SecretPrompt for F
where
    F: Fn(&str) -> Result<SecretString> + Send + Sync,
{
    fn obtain_secret(&self, host: &str) -> Result<SecretString> {
        self(host)
    }
}

/// Prompt that always fails
///
/// Useful where no operator is available to answer (non-interactive runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl SecretPrompt for NoPrompt {
    fn obtain_secret(&self, host: &str) -> Result<SecretString> {
        Err(crate::Error::credential(host, "no interactive prompt available"))
    }
}
