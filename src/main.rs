mod logging;

use std::path::Path;
use std::process::ExitCode;

use acb_box_scraper::config::{Cli, Config};
use acb_box_scraper::output::write_csv;
use acb_box_scraper::{AcbClient, AcbError, Result};
use clap::Parser;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match logging::init(&cli.log_level, Path::new("logs")) {
        Ok(path) => info!(path = %path.display(), "logging to file"),
        Err(e) => {
            eprintln!("failed to set up logging: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = run(&cli).await {
        error!("fatal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_file(&cli.config)?.merge_cli(cli);
    info!(path = %cli.config.display(), "configuration loaded");

    let (start_id, end_id) = config.validate()?;

    let http = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| AcbError::Config(format!("could not build http client: {e}")))?;
    let client = AcbClient::with_transport(http)
        .base_url(config.base_url.clone())
        .settings(config.fetch_settings());

    info!(start_id, end_id, "scraping games");
    let batch = client
        .scrape_range(start_id, end_id, config.concurrency)
        .await?;

    if batch.is_empty() {
        warn!("no game produced data, writing empty files");
    }
    if batch.failure_count() > 0 {
        warn!(failed = ?batch.failed_ids(), "some games were skipped");
    }

    write_csv(&config.output_file, &batch.players)?;
    write_csv(&config.output_file_game, &batch.games)?;

    info!(
        games = batch.succeeded(),
        failed = batch.failure_count(),
        players = batch.players.len(),
        skipped_rows = batch.skipped_rows,
        "done"
    );
    Ok(())
}
