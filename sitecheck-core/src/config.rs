// Run configuration and the input validators shared by CLI flags and prompts

use sitecheck_scanner::{FailureRecording, TraversalOrder};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Largest accepted worker count.
pub const MAX_CONCURRENCY: usize = 14;
/// Delays must be strictly greater than this many milliseconds.
pub const MIN_DELAY_EXCLUSIVE_MS: u64 = 250;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid sitemap URL: {0}")]
    InvalidSitemapUrl(String),

    #[error("Invalid concurrency limit {0}: must be between 1 and 14")]
    InvalidConcurrency(usize),

    #[error("Invalid request delay {0}ms: must be greater than 250ms")]
    InvalidDelay(u64),
}

/// Settings for one run. Built once, before any worker starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub sitemap_url: String,
    pub concurrency: usize,
    pub delay: Duration,
    pub order: TraversalOrder,
    pub seed: Option<u64>,
    pub failure_recording: FailureRecording,
}

impl RunConfig {
    pub fn new(
        sitemap_url: &str,
        concurrency: usize,
        delay_ms: u64,
        order: TraversalOrder,
    ) -> Result<Self, ConfigError> {
        let sitemap_url = parse_sitemap_url(sitemap_url).map_err(ConfigError::InvalidSitemapUrl)?;
        if !is_valid_concurrency(concurrency) {
            return Err(ConfigError::InvalidConcurrency(concurrency));
        }
        if !is_valid_delay(delay_ms) {
            return Err(ConfigError::InvalidDelay(delay_ms));
        }

        Ok(Self {
            sitemap_url,
            concurrency,
            delay: Duration::from_millis(delay_ms),
            order,
            seed: None,
            failure_recording: FailureRecording::default(),
        })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_failure_recording(mut self, policy: FailureRecording) -> Self {
        self.failure_recording = policy;
        self
    }
}

fn is_valid_concurrency(concurrency: usize) -> bool {
    concurrency > 0 && concurrency <= MAX_CONCURRENCY
}

fn is_valid_delay(delay_ms: u64) -> bool {
    delay_ms > MIN_DELAY_EXCLUSIVE_MS
}

/// Accepts anything starting with `http` that also parses as a URL.
pub fn parse_sitemap_url(input: &str) -> Result<String, String> {
    let input = input.trim();
    if !input.starts_with("http") {
        return Err(format!("'{}' must start with http", input));
    }
    Url::parse(input).map_err(|e| format!("'{}' is not a valid URL: {}", input, e))?;
    Ok(input.to_string())
}

pub fn parse_concurrency(input: &str) -> Result<usize, String> {
    let value: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", input.trim()))?;
    if !is_valid_concurrency(value) {
        return Err(ConfigError::InvalidConcurrency(value).to_string());
    }
    Ok(value)
}

pub fn parse_delay_ms(input: &str) -> Result<u64, String> {
    let value: u64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number of milliseconds", input.trim()))?;
    if !is_valid_delay(value) {
        return Err(ConfigError::InvalidDelay(value).to_string());
    }
    Ok(value)
}

pub fn parse_order(input: &str) -> Result<TraversalOrder, String> {
    input.parse()
}
