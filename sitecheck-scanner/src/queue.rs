use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// Order in which queued URLs are handed to workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    #[default]
    Sequential,
    Random,
}

impl TraversalOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::Sequential => "sequential",
            TraversalOrder::Random => "random",
        }
    }

    pub fn arrange<R: Rng + ?Sized>(&self, urls: &mut [String], rng: &mut R) {
        if let TraversalOrder::Random = self {
            urls.shuffle(rng);
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(TraversalOrder::Sequential),
            "random" => Ok(TraversalOrder::Random),
            other => Err(format!(
                "Invalid traversal order '{}': expected 'sequential' or 'random'",
                other
            )),
        }
    }
}

#[derive(Debug, Default)]
pub struct UrlQueue {
    pending: VecDeque<String>,
}

impl UrlQueue {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            pending: urls.into(),
        }
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn peek(&self, n: usize) -> Vec<String> {
        self.pending.iter().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
