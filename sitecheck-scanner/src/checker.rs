use crate::error::{Result, ScanError};
use crate::pause::{PAUSE_POLL_INTERVAL, PauseToken};
use crate::progress::{NoopReporter, PREVIEW_LEN, ProgressUpdate, SharedReporter};
use crate::queue::{TraversalOrder, UrlQueue};
use crate::result::{CheckResults, StatusHistogram};
use crate::store::{FailureRecording, RecordStore};
use crate::validator::{HttpValidator, Observation, Validator};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Everything the workers share during a run. Only ever touched under the
/// checker's mutex, and never held across a request or a sleep.
#[derive(Debug, Default)]
struct RunState {
    queue: UrlQueue,
    store: RecordStore,
    histogram: StatusHistogram,
    processed: usize,
    total: usize,
}

impl RunState {
    fn apply(&mut self, observation: &Observation) {
        self.store.record(observation);
        self.histogram.record(observation.status());
        self.processed += 1;
    }
}

enum Step {
    Paused,
    Check(String),
    Drained,
}

/// Fixed-size worker pool that checks every URL of a list exactly once.
pub struct Checker<V: Validator = HttpValidator> {
    validator: Arc<V>,
    concurrency: usize,
    delay: Duration,
    order: TraversalOrder,
    seed: Option<u64>,
    pause: PauseToken,
    reporter: SharedReporter,
    failure_recording: FailureRecording,
}

impl Checker<HttpValidator> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_validator(HttpValidator::new()?))
    }
}

impl<V: Validator> Checker<V> {
    pub fn with_validator(validator: V) -> Self {
        Self {
            validator: Arc::new(validator),
            concurrency: DEFAULT_CONCURRENCY,
            delay: DEFAULT_DELAY,
            order: TraversalOrder::Sequential,
            seed: None,
            pause: PauseToken::new(),
            reporter: Arc::new(NoopReporter),
            failure_recording: FailureRecording::default(),
        }
    }

    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pause_token(mut self, pause: PauseToken) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_progress_reporter(mut self, reporter: SharedReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_failure_recording(mut self, policy: FailureRecording) -> Self {
        self.failure_recording = policy;
        self
    }

    pub fn pause_token(&self) -> PauseToken {
        self.pause.clone()
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Returns after every worker is joined and the reporter's `finish` has run.
    pub async fn run(&self, mut urls: Vec<String>) -> Result<CheckResults> {
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConcurrency(self.concurrency));
        }

        match self.seed {
            Some(seed) => self.order.arrange(&mut urls, &mut StdRng::seed_from_u64(seed)),
            None => self.order.arrange(&mut urls, &mut rand::rng()),
        }

        let total = urls.len();
        info!(
            "Checking {} URLs with {} workers ({} order, {}ms delay)",
            total,
            self.concurrency,
            self.order,
            self.delay.as_millis()
        );

        let state = Arc::new(Mutex::new(RunState {
            queue: UrlQueue::new(urls),
            store: RecordStore::new(self.failure_recording),
            histogram: StatusHistogram::new(),
            processed: 0,
            total,
        }));

        let mut worker_handles = Vec::with_capacity(self.concurrency);
        for worker_id in 0..self.concurrency {
            let validator = self.validator.clone();
            let state = state.clone();
            let pause = self.pause.clone();
            let reporter = self.reporter.clone();
            let delay = self.delay;

            worker_handles.push(tokio::spawn(async move {
                work(worker_id, validator, state, pause, reporter, delay).await;
            }));
        }

        for handle in worker_handles {
            handle.await?;
        }

        let run = std::mem::take(&mut *state.lock().await);
        let (all, non_success) = run.store.into_parts();
        let results = CheckResults {
            all,
            non_success,
            histogram: run.histogram,
            processed: run.processed,
            total: run.total,
        };

        info!(
            "Check complete. {} of {} URLs processed, {} not OK",
            results.processed,
            results.total,
            results.non_success.len()
        );
        self.reporter.finish(&results);

        Ok(results)
    }
}

async fn work<V: Validator>(
    worker_id: usize,
    validator: Arc<V>,
    state: Arc<Mutex<RunState>>,
    pause: PauseToken,
    reporter: SharedReporter,
    delay: Duration,
) {
    debug!("Worker {} started", worker_id);

    loop {
        let step = {
            let mut run = state.lock().await;
            if pause.is_paused() {
                Step::Paused
            } else {
                match run.queue.pop_front() {
                    Some(url) => Step::Check(url),
                    None => Step::Drained,
                }
            }
        };

        let url = match step {
            Step::Paused => {
                tokio::time::sleep(PAUSE_POLL_INTERVAL).await;
                continue;
            }
            Step::Drained => break,
            Step::Check(url) => url,
        };

        let observation = validator.validate(&url).await;
        debug!("[Worker {}] {} -> {}", worker_id, url, observation.status());

        {
            let mut run = state.lock().await;
            run.apply(&observation);
            let update = ProgressUpdate {
                processed: run.processed,
                total: run.total,
                url: &url,
                status: observation.status(),
                histogram: &run.histogram,
                upcoming: run.queue.peek(PREVIEW_LEN),
                non_success: run.store.non_success(),
            };
            reporter.report(&update);
        }

        tokio::time::sleep(delay).await;
    }

    debug!("Worker {} finished", worker_id);
}
