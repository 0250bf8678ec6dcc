// Tests for run configuration and input validation

use sitecheck_core::config::{
    ConfigError, RunConfig, parse_concurrency, parse_delay_ms, parse_order, parse_sitemap_url,
};
use sitecheck_scanner::{FailureRecording, TraversalOrder};
use std::time::Duration;

// ============================================================================
// Sitemap URL
// ============================================================================

#[test]
fn test_sitemap_url_https() {
    let result = parse_sitemap_url("https://example.com/sitemap.xml");
    assert_eq!(result, Ok("https://example.com/sitemap.xml".to_string()));
}

#[test]
fn test_sitemap_url_is_trimmed() {
    let result = parse_sitemap_url("  http://example.com/sitemap.xml \n");
    assert_eq!(result, Ok("http://example.com/sitemap.xml".to_string()));
}

#[test]
fn test_sitemap_url_without_scheme() {
    let result = parse_sitemap_url("example.com/sitemap.xml");
    assert!(result.unwrap_err().contains("must start with http"));
}

#[test]
fn test_sitemap_url_ftp() {
    assert!(parse_sitemap_url("ftp://example.com/sitemap.xml").is_err());
}

#[test]
fn test_sitemap_url_unparseable() {
    let result = parse_sitemap_url("http://");
    assert!(result.unwrap_err().contains("not a valid URL"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrency_bounds() {
    assert_eq!(parse_concurrency("1"), Ok(1));
    assert_eq!(parse_concurrency("14"), Ok(14));
    assert_eq!(parse_concurrency(" 7 "), Ok(7));
    assert!(parse_concurrency("0").is_err());
    assert!(parse_concurrency("15").is_err());
}

#[test]
fn test_concurrency_not_a_number() {
    assert!(parse_concurrency("four").unwrap_err().contains("whole number"));
    assert!(parse_concurrency("-3").is_err());
    assert!(parse_concurrency("2.5").is_err());
}

// ============================================================================
// Delay
// ============================================================================

#[test]
fn test_delay_must_exceed_250() {
    assert!(parse_delay_ms("250").is_err());
    assert_eq!(parse_delay_ms("251"), Ok(251));
    assert_eq!(parse_delay_ms("1000"), Ok(1000));
}

#[test]
fn test_delay_not_a_number() {
    assert!(parse_delay_ms("fast").is_err());
    assert!(parse_delay_ms("").is_err());
}

// ============================================================================
// Order
// ============================================================================

#[test]
fn test_order_values() {
    assert_eq!(parse_order("sequential"), Ok(TraversalOrder::Sequential));
    assert_eq!(parse_order("RANDOM"), Ok(TraversalOrder::Random));
    assert!(parse_order("reverse").is_err());
}

// ============================================================================
// RunConfig
// ============================================================================

#[test]
fn test_run_config_valid() {
    let config = RunConfig::new(
        "https://example.com/sitemap.xml",
        3,
        300,
        TraversalOrder::Random,
    )
    .unwrap();

    assert_eq!(config.sitemap_url, "https://example.com/sitemap.xml");
    assert_eq!(config.concurrency, 3);
    assert_eq!(config.delay, Duration::from_millis(300));
    assert_eq!(config.order, TraversalOrder::Random);
    assert_eq!(config.seed, None);
    assert_eq!(config.failure_recording, FailureRecording::NonSuccessOnly);
}

#[test]
fn test_run_config_builders() {
    let config = RunConfig::new("https://example.com/sitemap.xml", 1, 500, TraversalOrder::Sequential)
        .unwrap()
        .with_seed(Some(9))
        .with_failure_recording(FailureRecording::Everywhere);

    assert_eq!(config.seed, Some(9));
    assert_eq!(config.failure_recording, FailureRecording::Everywhere);
}

#[test]
fn test_run_config_rejects_bad_values() {
    assert!(matches!(
        RunConfig::new("example.com", 3, 300, TraversalOrder::Sequential),
        Err(ConfigError::InvalidSitemapUrl(_))
    ));
    assert_eq!(
        RunConfig::new("https://example.com/", 0, 300, TraversalOrder::Sequential),
        Err(ConfigError::InvalidConcurrency(0))
    );
    assert_eq!(
        RunConfig::new("https://example.com/", 15, 300, TraversalOrder::Sequential),
        Err(ConfigError::InvalidConcurrency(15))
    );
    assert_eq!(
        RunConfig::new("https://example.com/", 2, 250, TraversalOrder::Sequential),
        Err(ConfigError::InvalidDelay(250))
    );
}
