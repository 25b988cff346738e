use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "oxidash",
    version,
    about = "A lightweight terminal dashboard for Redis-backed session monitoring",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the session monitoring backend.
    #[arg(short, long, env = "OXIDASH_SERVER_URL", value_name = "URL")]
    pub server_url: Option<String>,

    /// Auto-refresh interval in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub refresh_interval: Option<u64>,

    /// Start the auto-refresh timer on launch.
    #[arg(long)]
    pub auto_refresh: Option<bool>,

    /// Notification display duration in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub notification_duration: Option<u64>,

    /// Mirror health alerts to the desktop.
    #[arg(long)]
    pub desktop_notifications: Option<bool>,

    /// Directory session exports are written to.
    #[arg(long, value_name = "PATH")]
    pub export_dir: Option<PathBuf>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}
