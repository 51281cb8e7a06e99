//! XDG directory utilities
//!
//! The configuration file lives directly in the XDG config home:
//! `$XDG_CONFIG_HOME/arsync.conf`, falling back to `~/.config/arsync.conf`.

use std::path::PathBuf;
use xdg::BaseDirectories;

/// File name of the configuration file inside the config home
pub const CONFIG_FILE_NAME: &str = "arsync.conf";

/// Get the XDG config home
///
/// Returns `$XDG_CONFIG_HOME` or `~/.config`
#[must_use]
pub fn config_home() -> Option<PathBuf> {
    // xdg 3.0: get_*_home returns Option<PathBuf>
    BaseDirectories::new().get_config_home()
}

/// Get the default config file path
///
/// Returns `$XDG_CONFIG_HOME/arsync.conf` or `~/.config/arsync.conf`
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_home().map(|d| d.join(CONFIG_FILE_NAME))
}
