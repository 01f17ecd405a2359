use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;
use crate::error::{AppError, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SOURCE_URL: &str = "https://www.heavens-above.com/PassSummary.aspx";

/// Parameters handed to a table source on every run. Fixed for the life of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    /// NORAD catalogue number of the satellite.
    pub target: u32,
    pub pages: u32,
    /// Directory that receives output artifacts.
    pub root: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target: 25544,
            pages: 4,
            root: PathBuf::from("./public/data/"),
        }
    }
}

/// Observer position used when querying pass predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverLocation {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    /// Altitude in metres.
    pub alt: i32,
    pub tz: String,
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self {
            lat: 39.9042,
            lng: 116.4074,
            name: "北京市".to_string(),
            alt: 52,
            tz: "ChST".to_string(),
        }
    }
}

/// Everything needed to run a scrape. Loading it never touches the server settings.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub source_url: String,
    pub scrape: ScrapeConfig,
    pub location: ObserverLocation,
}

impl SourceConfig {
    pub fn load() -> Self {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            source_url: lookup("SCRAPE_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            scrape: ScrapeConfig::default(),
            location: ObserverLocation::default(),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub source: SourceConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_port(lookup("PORT").as_deref());
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            source: SourceConfig::from_lookup(lookup),
        })
    }
}

/// Resolves the listening port from the raw `PORT` value, falling back to 3000.
pub fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(value) => match value.trim().parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                warn!("Invalid PORT {:?} ({}), using {}", value, e, DEFAULT_PORT);
                DEFAULT_PORT
            }
        },
    }
}
