use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusRecord {
    pub url: String,
    pub status: u16,
}

impl StatusRecord {
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
        }
    }
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusHistogram {
    counts: BTreeMap<u16, usize>,
}

impl StatusHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: u16) {
        *self.counts.entry(status).or_insert(0) += 1;
    }

    pub fn get(&self, status: u16) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }
}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckResults {
    pub all: Vec<StatusRecord>,
    pub non_success: Vec<StatusRecord>,
    pub histogram: StatusHistogram,
    pub processed: usize,
    pub total: usize,
}
