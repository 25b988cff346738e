use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oxidash::infrastructure::{
    AppConfig, CliArgs, EventStreamClient, MonitorClient, StorageManager,
};
use oxidash::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn create_app() -> Result<App> {
    let args = CliArgs::parse();

    let storage = StorageManager::new()?;
    let mut config = match &args.config {
        Some(path) => storage.load_config_from(path)?,
        None => storage.load_config()?,
    };
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = oxidash::VERSION, server = %config.server_url, "Starting Oxidash");

    let client = MonitorClient::new(&config.server_url)?;
    let events = EventStreamClient::new(client.http_client(), client.base_url());

    Ok(App::new(Arc::new(client), Some(events), config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
