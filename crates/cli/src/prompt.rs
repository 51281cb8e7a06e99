//! Interactive password prompt

use arsync_core::SecretPrompt;
use dialoguer::{Password, theme::ColorfulTheme};
use secrecy::SecretString;
use std::sync::{Mutex, PoisonError};

/// Reads SSH passwords from the terminal
///
/// Concurrent syncs may ask for passwords at the same time; the lock keeps
/// one prompt on screen at a time.
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    terminal: Mutex<()>,
}

impl TerminalPrompt {
    /// Create a new prompt
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretPrompt for TerminalPrompt {
    fn obtain_secret(&self, host: &str) -> arsync_core::Result<SecretString> {
        let _terminal = self.terminal.lock().unwrap_or_else(PoisonError::into_inner);

        let password = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Enter SSH password for {host}"))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| arsync_core::Error::credential(host, e))?;

        Ok(SecretString::from(password))
    }
}
