//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by
/// CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the session monitoring backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Refresh configuration.
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Notification configuration.
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Auto-refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Start the auto-refresh timer on launch.
    #[serde(default)]
    pub auto_start: bool,

    /// Auto-refresh interval in seconds.
    #[serde(default = "default_refresh_interval")]
    pub interval_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            auto_start: false,
            interval_seconds: default_refresh_interval(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Notification display duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Timestamp format string (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Mirror health alerts from the event stream to the desktop.
    #[serde(default = "default_true")]
    pub desktop: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { desktop: true }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory session exports are written to. Defaults to the current
    /// working directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    /// Resolved export directory.
    #[must_use]
    pub fn effective_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_notification_duration() -> u64 {
    5
}

fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}

fn default_accent_color() -> String {
    "Cyan".to_string()
}

fn default_true() -> bool {
    true
}

use super::args::CliArgs;
use super::storage::StorageManager;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(server_url) = args.server_url {
            self.server_url = server_url;
        }
        if let Some(interval) = args.refresh_interval {
            self.refresh.interval_seconds = interval;
        }
        if let Some(auto_refresh) = args.auto_refresh {
            self.refresh.auto_start = auto_refresh;
        }
        if let Some(duration) = args.notification_duration {
            self.ui.notification_duration = duration;
        }
        if let Some(desktop) = args.desktop_notifications {
            self.notifications.desktop = desktop;
        }
        if let Some(directory) = args.export_dir {
            self.export.directory = Some(directory);
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        StorageManager::project_dirs().map(|dirs| dirs.data_dir().join("oxidash.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            server_url: default_server_url(),
            refresh: RefreshConfig::default(),
            ui: UiConfig::default(),
            notifications: NotificationsConfig::default(),
            export: ExportConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
            server_url = "http://cache-mon.internal:9090"

            [refresh]
            auto_start = true
            interval_seconds = 60

            [notifications]
            desktop = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.server_url, "http://cache-mon.internal:9090");
        assert!(config.refresh.auto_start);
        assert_eq!(config.refresh.interval_seconds, 60);
        assert!(!config.notifications.desktop);
        assert_eq!(config.ui.notification_duration, 5);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server_url, "http://localhost:8080");
        assert!(!config.refresh.auto_start);
        assert_eq!(config.refresh.interval_seconds, 30);
        assert!(config.notifications.desktop);
        assert_eq!(config.export.effective_directory(), PathBuf::from("."));
    }

    #[test]
    fn test_merge_with_args_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Debug),
            server_url: Some("http://override:8080".to_string()),
            refresh_interval: Some(15),
            auto_refresh: Some(true),
            notification_duration: None,
            desktop_notifications: None,
            export_dir: None,
            accent_color: None,
        };

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.server_url, "http://override:8080");
        assert_eq!(config.refresh.interval_seconds, 15);
        assert!(config.refresh.auto_start);
    }
}
