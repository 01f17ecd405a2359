use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use tracing::{debug, info};

use crate::config::{ObserverLocation, ScrapeConfig};
use crate::error::Result;
use crate::runner::TableSource;

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to build HTTP client")
});

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("Failed to parse table selector")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Failed to parse row selector")
});

static HEADER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("th").expect("Failed to parse header selector")
});

static DATA_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("Failed to parse data selector")
});

// Row headers (`<th>` inside a data row) count as cells.
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("th, td").expect("Failed to parse cell selector")
});

/// Fetches paginated pass tables over HTTP and stores a JSON copy under the config root.
pub struct HtmlTableSource {
    base_url: String,
    location: ObserverLocation,
}

impl HtmlTableSource {
    pub fn new(base_url: impl Into<String>, location: ObserverLocation) -> Self {
        Self {
            base_url: base_url.into(),
            location,
        }
    }

    fn query(&self, target: u32, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("satid", target.to_string()),
            ("lat", self.location.lat.to_string()),
            ("lng", self.location.lng.to_string()),
            ("loc", self.location.name.clone()),
            ("alt", self.location.alt.to_string()),
            ("tz", self.location.tz.clone()),
            ("page", page.to_string()),
        ]
    }

    async fn fetch_page(&self, target: u32, page: u32) -> Result<String> {
        let response = CLIENT
            .get(&self.base_url)
            .query(&self.query(target, page))
            .send()
            .await?
            .error_for_status()?;
        let html = response.text().await?;
        Ok(html)
    }
}

#[async_trait]
impl TableSource for HtmlTableSource {
    async fn get_table(&self, config: &ScrapeConfig) -> Result<Value> {
        let mut rows = Vec::new();

        for page in 0..config.pages {
            let html = self.fetch_page(config.target, page).await?;
            let page_rows = parse_table(&html);
            debug!("Page {} of satellite {}: {} rows", page, config.target, page_rows.len());

            if page_rows.is_empty() {
                break;
            }
            rows.extend(page_rows);
        }

        let path = write_artifact(&config.root, config.target, &rows).await?;
        info!("Stored {} rows for satellite {} at {:?}", rows.len(), config.target, path);

        Ok(Value::Array(rows))
    }
}

/// Turns the first `<table>` of a page into one JSON object per data row.
///
/// The first row made only of `<th>` cells supplies the keys; rows wider than
/// the header fall back to `col<N>`.
pub fn parse_table(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);

    let Some(table) = document.select(&TABLE_SELECTOR).next() else {
        return Vec::new();
    };

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for row in table.select(&ROW_SELECTOR) {
        let is_header_row = row.select(&DATA_SELECTOR).next().is_none();
        if headers.is_empty() && is_header_row {
            headers = row.select(&HEADER_SELECTOR).map(cell_text).collect();
            continue;
        }

        let cells: Vec<String> = row.select(&CELL_SELECTOR).map(cell_text).collect();
        if cells.is_empty() {
            continue;
        }

        let mut record = Map::with_capacity(cells.len());
        for (i, value) in cells.into_iter().enumerate() {
            let key = headers
                .get(i)
                .filter(|h| !h.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("col{}", i));
            record.insert(key, Value::String(value));
        }
        rows.push(Value::Object(record));
    }

    rows
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let mut result = String::new();
    for word in cell.text().flat_map(str::split_whitespace) {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

pub async fn write_artifact(root: &Path, target: u32, rows: &[Value]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(root).await?;

    let path = root.join(format!("{}.json", target));
    let document = json!({
        "target": target,
        "fetched_at": Utc::now(),
        "rows": rows,
    });
    tokio::fs::write(&path, serde_json::to_vec_pretty(&document)?).await?;

    Ok(path)
}
