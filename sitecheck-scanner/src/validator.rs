use crate::error::Result;
use crate::result::{StatusRecord, TRANSPORT_FAILURE_STATUS};
use reqwest::Client;
use std::future::Future;
use tracing::{debug, warn};

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    Response(StatusRecord),
    TransportFailure(StatusRecord),
}

impl Observation {
    pub fn record(&self) -> &StatusRecord {
        match self {
            Observation::Response(record) | Observation::TransportFailure(record) => record,
        }
    }

    pub fn status(&self) -> u16 {
        self.record().status
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Observation::TransportFailure(_))
    }
}

/// One attempt, no retries. Errors become [`Observation::TransportFailure`].
pub trait Validator: Send + Sync + 'static {
    fn validate(&self, url: &str) -> impl Future<Output = Observation> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpValidator {
    client: Client,
}

impl HttpValidator {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sitecheck/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Validator for HttpValidator {
    async fn validate(&self, url: &str) -> Observation {
        debug!("GET {}", url);

        match self.client.get(url).send().await {
            Ok(response) => {
                Observation::Response(StatusRecord::new(url, response.status().as_u16()))
            }
            Err(e) => {
                let status = e
                    .status()
                    .map(|s| s.as_u16())
                    .unwrap_or(TRANSPORT_FAILURE_STATUS);
                warn!("Request to {} failed ({}): {}", url, status, e);
                Observation::TransportFailure(StatusRecord::new(url, status))
            }
        }
    }
}
