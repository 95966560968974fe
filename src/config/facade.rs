//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::DotstateConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global config file and environment.
    pub fn load() -> Result<DotstateConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<DotstateConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> DotstateConfig {
        DotstateConfig::default()
    }
}
