mod app;
mod client;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let source = client::Source::from_config(&config)?;
    tracing::info!("loading debts from {}", source.describe());

    let mut app = app::App::new(&config, source);
    app.run().await?;
    Ok(())
}

/// Logs go to a file: the terminal belongs to the UI while it runs.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "debtdesk={level},engine={level}",
            level = config.level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
