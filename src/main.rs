use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedcaster::app::AppContext;
use feedcaster::cli::Cli;
use feedcaster::config::{Config, Secrets};
use feedcaster::domain::LastChecked;
use feedcaster::workflow::RunOutcome;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedcaster=info")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Ignoring .env file: {}", e);
        }
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.validated_feed_url()? {
        config.feed.url = url;
    }

    let last_checked = LastChecked::now();
    let ctx = AppContext::new(config, Secrets::from_env())?;
    let report = ctx.workflow().dry_run(cli.dry_run).run(last_checked).await?;

    match &report.outcome {
        RunOutcome::NoArticles => tracing::info!("Nothing to post"),
        RunOutcome::Publish(outcome) if !outcome.is_published() => {
            tracing::warn!("Run finished without publishing")
        }
        _ => {}
    }
    tracing::debug!("Run complete, last checked {}", report.last_checked.at());

    Ok(())
}
