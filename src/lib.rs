pub mod api;
pub mod config;
pub mod error;
pub mod runner;
pub mod scraper;

use std::sync::Arc;
use config::SourceConfig;
use runner::ScrapeRunner;
use scraper::HtmlTableSource;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<ScrapeRunner>,
}

impl AppState {
    pub fn new(runner: ScrapeRunner) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }
}

/// Wires the HTTP table source into a runner using the loaded configuration.
pub fn build_runner(config: &SourceConfig) -> ScrapeRunner {
    let source = HtmlTableSource::new(config.source_url.clone(), config.location.clone());
    ScrapeRunner::new(config.scrape.clone(), Arc::new(source))
}

/// Installs the global `tracing` subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
