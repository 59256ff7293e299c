//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted app configuration.
///
/// Backs the `config` subcommands and the record-run merge: values loaded
/// here sit below CLI flags and above the built-in constants. The stored
/// keys are `output_dir`, `device`, `live_gain`, and `overview_gain`, all
/// optional.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration. A missing backing file is not an
    /// error; it loads as a config with every field unset.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Write the configuration back, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing config file.
    fn path(&self) -> PathBuf;

    /// Whether the backing file exists yet.
    fn exists(&self) -> bool;

    /// Create the backing file seeded with the default gains.
    /// Fails with [`ConfigError::AlreadyExists`] when one is present.
    async fn init(&self) -> Result<(), ConfigError>;
}
