use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::error::Result;

/// Anything that can produce the satellite data table for a given configuration.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn get_table(&self, config: &ScrapeConfig) -> Result<Value>;
}

/// Triggers a fetch with a fixed configuration and hands back whatever the source returns.
#[derive(Clone)]
pub struct ScrapeRunner {
    config: ScrapeConfig,
    source: Arc<dyn TableSource>,
}

impl ScrapeRunner {
    pub fn new(config: ScrapeConfig, source: Arc<dyn TableSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    pub async fn run_scrape(&self) -> Result<Value> {
        debug!(
            "Running scrape: target={} pages={} root={:?}",
            self.config.target, self.config.pages, self.config.root
        );
        self.source.get_table(&self.config).await
    }
}
