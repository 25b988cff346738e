use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "tecknian";
const APP_NAME: &str = "oxidash";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Create a new `StorageManager`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = Self::project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Creates a new `StorageManager` with a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Platform directories for this application.
    #[must_use]
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Loads the configuration file, or defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        self.load_config_from(&self.config_path())
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_config_from(&self, path: &Path) -> Result<AppConfig, ConfigError> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Writes the configuration to the managed config path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created or the
    /// file cannot be written.
    pub fn save_config(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir)?;
        let content = toml::to_string_pretty(config)?;
        fs::write(self.config_path(), content)?;
        Ok(())
    }
}
