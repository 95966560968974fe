//! Configuration System
//!
//! Layered configuration built with the `config` crate. Sources, lowest
//! precedence first: merge-policy defaults, the global config file
//! (`$XDG_CONFIG_HOME/dotstate/config.toml`) or an explicit `--config` file,
//! then `DOTSTATE__*` environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::path::AbsPath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;

/// XDG path helpers
pub mod xdg {
    pub use super::paths::xdg_root::*;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DotstateConfig {
    /// Persistent state settings
    #[serde(default)]
    pub persistent_state: PersistentStateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistent state configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistentStateConfig {
    /// Store location; `None` means `$XDG_CONFIG_HOME/dotstate/dotstate.db`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PersistentStateConfig {
    /// Resolve the store location
    ///
    /// Precedence: explicit override, configured path, XDG default. Relative
    /// paths are taken relative to the current directory.
    pub fn resolve_path(&self, override_path: Option<&PathBuf>) -> Result<AbsPath, ApiError> {
        let path = match override_path.or(self.path.as_ref()) {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => xdg::default_persistent_state_path()?,
        };
        Ok(AbsPath::from_cwd(path)?)
    }
}
