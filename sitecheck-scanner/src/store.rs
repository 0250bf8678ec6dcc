use crate::result::StatusRecord;
use crate::validator::Observation;
use serde::{Deserialize, Serialize};

/// Failed requests go to the non-2xx list only, unless `Everywhere`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureRecording {
    #[default]
    NonSuccessOnly,
    Everywhere,
}

#[derive(Debug, Default)]
pub struct RecordStore {
    policy: FailureRecording,
    all: Vec<StatusRecord>,
    non_success: Vec<StatusRecord>,
}

impl RecordStore {
    pub fn new(policy: FailureRecording) -> Self {
        Self {
            policy,
            all: Vec::new(),
            non_success: Vec::new(),
        }
    }

    pub fn record(&mut self, observation: &Observation) {
        let record = observation.record();

        let goes_to_all = match observation {
            Observation::Response(_) => true,
            Observation::TransportFailure(_) => self.policy == FailureRecording::Everywhere,
        };
        if goes_to_all {
            self.all.push(record.clone());
        }
        if !record.is_ok() {
            self.non_success.push(record.clone());
        }
    }

    pub fn all(&self) -> &[StatusRecord] {
        &self.all
    }

    pub fn non_success(&self) -> &[StatusRecord] {
        &self.non_success
    }

    pub fn into_parts(self) -> (Vec<StatusRecord>, Vec<StatusRecord>) {
        (self.all, self.non_success)
    }
}
