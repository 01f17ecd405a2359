use std::process::ExitCode;
use tracing::{error, info};
use satellite_scraper::{build_runner, config::SourceConfig, init_tracing};

/// One-shot scrape without the HTTP server.
#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let runner = build_runner(&SourceConfig::load());
    info!(
        "Scraping satellite {} ({} pages) into {:?}",
        runner.config().target,
        runner.config().pages,
        runner.config().root
    );

    match runner.run_scrape().await {
        Ok(database) => {
            info!(
                "Scrape completed. Items: {}",
                database.as_array().map_or(0, Vec::len)
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Scrape failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
