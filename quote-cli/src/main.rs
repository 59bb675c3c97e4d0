use anyhow::Context;
use clap::Parser;
use tracing::debug;

use quote_cli::{App, AppConfig, Cli, app, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => AppConfig::default(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level, cli.log_file.as_deref())?;
    if let Some(path) = &cli.config {
        debug!(path = %path.display(), "configuration loaded");
    }

    let catalog = app::load_catalog(&config.catalog, cli.catalog_dir.as_deref())?;
    let app = App::new(config, catalog)?;
    debug!(
        services = app.catalog().services.len(),
        industries = app.catalog().industries.len(),
        features = app.catalog().features.len(),
        "catalog ready"
    );

    let output = app.run(&cli.command)?;
    println!("{output}");
    Ok(())
}
