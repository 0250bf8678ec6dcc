use crate::result::{CheckResults, StatusHistogram, StatusRecord};
use std::sync::Arc;

pub const PREVIEW_LEN: usize = 5;

/// Snapshot handed to the reporter after every processed URL.
#[derive(Debug)]
pub struct ProgressUpdate<'a> {
    pub processed: usize,
    pub total: usize,
    pub url: &'a str,
    pub status: u16,
    pub histogram: &'a StatusHistogram,
    pub upcoming: Vec<String>,
    pub non_success: &'a [StatusRecord],
}

/// `report` runs while the run state is locked, so `processed` only grows.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: &ProgressUpdate<'_>);

    fn finish(&self, _results: &CheckResults) {}
}

pub type SharedReporter = Arc<dyn ProgressReporter>;

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _update: &ProgressUpdate<'_>) {}
}
