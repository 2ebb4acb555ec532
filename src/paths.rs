//! Centralized path definitions for trello-cards
//!
//! ## Layout
//!
//! ```text
//! ~/.config/trello-cards/
//! └── config.toml               # Optional credentials and overrides
//! ```
//!
//! The config file location can be replaced wholesale with the
//! `TRELLO_CARDS_CONFIG` environment variable.

use std::path::{Path, PathBuf};

/// Directory name under the user's config directory
const GLOBAL_DIR: &str = "trello-cards";

/// Global configuration filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Environment variable that points at an alternate config file
pub const CONFIG_PATH_ENV: &str = "TRELLO_CARDS_CONFIG";

/// Get the global config directory path.
///
/// Falls back to `~/.config` when the platform has no config directory.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and `~user` forms, are returned unchanged.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR)) {
        return PathBuf::from(path);
    }
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR])),
        None => PathBuf::from(path),
    }
}

/// Final component of a path as a string, used as the upload name.
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned())
}
