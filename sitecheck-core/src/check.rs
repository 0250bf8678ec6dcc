use crate::config::RunConfig;
use crate::error::Result;
use crate::progress::ProgressTable;
use crate::sitemap::{fetch_sitemap_urls, sitemap_client};
use indicatif::MultiProgress;
use sitecheck_scanner::{
    CheckResults, Checker, HttpValidator, NoopReporter, PauseToken, SharedReporter, Validator,
};
use std::sync::Arc;

/// Options for configuring a check run
pub struct CheckOptions {
    pub config: RunConfig,
    /// Draw the progress table here. `None` runs silently.
    pub progress: Option<MultiProgress>,
}

/// Callback for reporting run lifecycle messages
pub type CheckProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Load the sitemap and check every URL it lists.
///
/// `pause` is handed to every worker; flip it from outside to pause the run.
pub async fn execute_check(
    options: CheckOptions,
    pause: PauseToken,
    progress_callback: Option<CheckProgressCallback>,
) -> Result<CheckResults> {
    let CheckOptions {
        config,
        progress,
    } = options;

    let notify = |msg: String| {
        if let Some(ref callback) = progress_callback {
            callback(msg);
        }
    };

    notify(format!("Fetching sitemap {}", config.sitemap_url));
    let client = sitemap_client()?;
    let urls = fetch_sitemap_urls(&client, &config.sitemap_url).await?;
    notify(format!("Found {} URLs", urls.len()));

    let reporter: SharedReporter = match progress {
        Some(ref multi) => Arc::new(ProgressTable::new(multi, urls.len())),
        None => Arc::new(NoopReporter),
    };

    let checker = build_checker(&config, HttpValidator::new()?)
        .with_pause_token(pause)
        .with_progress_reporter(reporter);

    let results = checker.run(urls).await?;
    Ok(results)
}

/// Apply a run configuration to a checker around `validator`.
pub fn build_checker<V: Validator>(config: &RunConfig, validator: V) -> Checker<V> {
    Checker::with_validator(validator)
        .with_concurrency(config.concurrency)
        .with_delay(config.delay)
        .with_order(config.order)
        .with_seed(config.seed)
        .with_failure_recording(config.failure_recording)
}
