use crate::config::ConfigError;
use sitecheck_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to fetch sitemap {url}: {source}")]
    SitemapFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sitemap {url} returned HTTP {status}")]
    SitemapStatus { url: String, status: u16 },

    #[error("Could not parse sitemap {url}: {reason}")]
    SitemapParse { url: String, reason: String },

    #[error("Sitemap {0} does not list any URLs")]
    EmptySitemap(String),

    #[error("Check failed: {0}")]
    Scan(#[from] ScanError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckError>;
