//! XDG Base Directory utilities for configuration and persistent state.

use crate::error::ApiError;
use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home).join(".config"));
    }

    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            ApiError::ConfigError(
                "Could not determine XDG config home directory (HOME not set)".to_string(),
            )
        })
}

/// Get the dotstate config directory
///
/// Returns `$XDG_CONFIG_HOME/dotstate/`
pub fn config_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("dotstate"))
}

/// Default persistent state location
///
/// Returns `$XDG_CONFIG_HOME/dotstate/dotstate.db`
pub fn default_persistent_state_path() -> Result<PathBuf, ApiError> {
    Ok(config_dir()?.join("dotstate.db"))
}
