//! Infrastructure layer with external service adapters.

/// System clipboard.
pub mod clipboard;
/// Application configuration.
pub mod config;
/// Monitoring backend client.
pub mod monitor;
/// System notifications.
pub mod notifications;

pub use clipboard::{ClipboardError, ClipboardService};
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use monitor::{EventStreamClient, MonitorClient, SseParser, StreamUpdate, USER_AGENT};
pub use notifications::DesktopNotificationService;
