mod app;
mod state;
mod theme;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use boardgames_core::{
    config::{self, AppConfig},
    Catalog, CatalogLoader,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;

    let catalog = match &config.catalog_path {
        Some(path) => CatalogLoader::load(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    info!(
        games = catalog.len(),
        price_span = ?catalog.price_span(),
        source = config
            .catalog_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string()),
        "Catalog ready"
    );

    let mut app = app::CatalogApp::new(catalog, &config);
    app.run().await
}

fn init_logging(log_dir: &Path) -> Result<()> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("boardgames.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // the terminal is in raw mode for the whole session, so only the file
    // receives events
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
