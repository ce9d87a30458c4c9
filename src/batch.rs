//! Batch orchestrator: entry construction, worker pool, result aggregation.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::{BatchConfig, ConfigError};
use crate::id::{IdGenerator, RandomIdGenerator};
use crate::progress::{snapshot_of, BatchStatus, ProgressObserver};
use crate::request::{build_requests, DownloadRequest, RequestStatus};
use crate::retry::BackoffPolicy;
use crate::scheduler::{run_pool, BatchState};
use crate::storage::{DirSink, Sink};
use crate::transfer::{HttpTransfer, Transfer};

/// Final success/failure partition of a batch. Each side preserves its
/// entries' original relative order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub successes: Vec<DownloadRequest>,
    pub failures: Vec<DownloadRequest>,
}

/// Failure of a batch run as a whole. Per-item download failures are soft and
/// never surface here; they live in `BatchResult::failures`.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("worker task join: {0}")]
    Join(String),
}

/// The download orchestrator. Holds the injected capabilities and the batch
/// configuration; one `run` call processes one batch, with no state carried
/// across batches.
pub struct BatchRunner {
    config: BatchConfig,
    transfer: Arc<dyn Transfer>,
    sink: Arc<dyn Sink>,
    observer: Option<Arc<dyn ProgressObserver>>,
    ids: Arc<dyn IdGenerator>,
}

impl BatchRunner {
    /// Runner with default configuration, HTTP transfer, and a sink writing
    /// into the current directory.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> BatchRunnerBuilder {
        BatchRunnerBuilder::new()
    }

    /// Runs one batch over `urls` to completion and returns the partition of
    /// terminal requests.
    ///
    /// Emits one `idle` snapshot after entries are constructed, `running`
    /// snapshots as requests are dispatched and finish, and one `completed`
    /// snapshot after the pool joins. An empty `urls` list returns an empty
    /// result immediately with no emission at all.
    pub async fn run(&self, urls: &[String]) -> Result<BatchResult, BatchError> {
        self.config.validate()?;

        if urls.is_empty() {
            return Ok(BatchResult::default());
        }

        let entries = build_requests(urls, self.ids.as_ref());
        info!(total = entries.len(), concurrency = self.config.concurrency, "starting batch");

        if let Some(obs) = &self.observer {
            obs.on_snapshot(snapshot_of(&entries, BatchStatus::Idle)).await;
        }

        let state = Arc::new(Mutex::new(BatchState::new(entries)));
        run_pool(
            Arc::clone(&state),
            self.config.concurrency,
            BackoffPolicy::from_config(&self.config),
            Arc::clone(&self.transfer),
            Arc::clone(&self.sink),
            self.observer.clone(),
        )
        .await
        .map_err(BatchError::Join)?;

        // All workers have joined; no task still holds the state.
        let entries = match Arc::try_unwrap(state) {
            Ok(m) => m.into_inner().entries,
            Err(arc) => arc.lock().await.entries.clone(),
        };

        if let Some(obs) = &self.observer {
            obs.on_snapshot(snapshot_of(&entries, BatchStatus::Completed)).await;
        }

        let result = partition(entries);
        info!(
            successes = result.successes.len(),
            failures = result.failures.len(),
            "batch finished"
        );
        Ok(result)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits terminal entries into successes and failures, preserving each
/// subset's original relative order.
fn partition(entries: Vec<DownloadRequest>) -> BatchResult {
    let mut result = BatchResult::default();
    for req in entries {
        match req.status {
            RequestStatus::Success => result.successes.push(req),
            _ => result.failures.push(req),
        }
    }
    result
}

/// Builder for [`BatchRunner`].
pub struct BatchRunnerBuilder {
    config: BatchConfig,
    transfer: Option<Arc<dyn Transfer>>,
    sink: Option<Arc<dyn Sink>>,
    observer: Option<Arc<dyn ProgressObserver>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl BatchRunnerBuilder {
    pub fn new() -> Self {
        Self {
            config: BatchConfig::default(),
            transfer: None,
            sink: None,
            observer: None,
            ids: None,
        }
    }

    pub fn config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    pub fn retry_delay(mut self, retry_delay: std::time::Duration) -> Self {
        self.config.retry_delay = retry_delay;
        self
    }

    pub fn transfer(mut self, transfer: Arc<dyn Transfer>) -> Self {
        self.transfer = Some(transfer);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> BatchRunner {
        BatchRunner {
            config: self.config,
            transfer: self.transfer.unwrap_or_else(|| Arc::new(HttpTransfer::new())),
            sink: self.sink.unwrap_or_else(|| Arc::new(DirSink::new("."))),
            observer: self.observer,
            ids: self.ids.unwrap_or_else(|| Arc::new(RandomIdGenerator)),
        }
    }
}

impl Default for BatchRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
