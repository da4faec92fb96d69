//! Runtime configuration for the CrossRef client and exports.

use crate::error::{AppError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Crossref works endpoint
pub const CROSSREF_API_URL: &str = "https://api.crossref.org/works";

/// Results requested per search (first page only)
pub const DEFAULT_ROWS: u32 = 100;

/// CrossRef refuses `rows` above this
pub const MAX_ROWS: u32 = 1000;

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for [`crate::crossref::CrossrefClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the `works` endpoint
    pub works_url: String,
    /// Value of the `rows` query parameter
    pub rows: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Contact address for CrossRef's polite pool
    pub mailto: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            works_url: CROSSREF_API_URL.to_string(),
            rows: DEFAULT_ROWS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            mailto: None,
        }
    }
}

impl ClientConfig {
    /// Check the endpoint URL and row cap
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.works_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", self.works_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(AppError::Config(format!(
                "rows must be between 1 and {}, got {}",
                MAX_ROWS, self.rows
            )));
        }
        Ok(())
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> String {
        match self.mailto.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            Some(mailto) => format!(
                "{}/{} (mailto:{})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                mailto
            ),
            None => format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Default directory for saved spreadsheets: Downloads, then home, then `.`
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
