//! Shared fakes for integration tests: scripted transfer, in-memory sink,
//! recording observer.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use batchget::progress::{ProgressObserver, ProgressSnapshot};
use batchget::storage::Sink;
use batchget::transfer::{Transfer, TransferError};

/// Transfer fake with per-URL scripting: optional latency, fail-the-first-N
/// behavior, and an always-fail URL substring. Records the paused-clock time
/// of every fetch so backoff schedules can be asserted exactly.
pub struct FakeTransfer {
    latency: Duration,
    fail_first: u32,
    fail_substring: Option<String>,
    error: TransferError,
    calls: Mutex<HashMap<String, u32>>,
    fetch_times: Mutex<Vec<tokio::time::Instant>>,
}

impl FakeTransfer {
    fn base() -> Self {
        Self {
            latency: Duration::ZERO,
            fail_first: 0,
            fail_substring: None,
            error: TransferError::Http(500),
            calls: Mutex::new(HashMap::new()),
            fetch_times: Mutex::new(Vec::new()),
        }
    }

    /// Every fetch succeeds.
    pub fn ok() -> Self {
        Self::base()
    }

    /// Every fetch fails with `error`.
    pub fn failing_with(error: TransferError) -> Self {
        Self {
            fail_first: u32::MAX,
            error,
            ..Self::base()
        }
    }

    /// The first `fail_first` fetches of each URL fail, later ones succeed.
    pub fn flaky(fail_first: u32) -> Self {
        Self {
            fail_first,
            ..Self::base()
        }
    }

    /// Fetches of URLs containing `substring` always fail; others succeed.
    pub fn failing_urls_containing(substring: &str) -> Self {
        Self {
            fail_substring: Some(substring.to_string()),
            ..Self::base()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls_for(&self, url: &str) -> u32 {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn fetch_times(&self) -> Vec<tokio::time::Instant> {
        self.fetch_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transfer for FakeTransfer {
    async fn fetch(&self, url: &str) -> Result<Bytes, TransferError> {
        self.fetch_times
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let n = calls.entry(url.to_string()).or_insert(0);
            *n += 1;
            *n
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let scripted_fail = self
            .fail_substring
            .as_deref()
            .map_or(false, |s| url.contains(s));
        if call <= self.fail_first || scripted_fail {
            return Err(self.error.clone());
        }
        Ok(Bytes::from(format!("body of {}", url)))
    }
}

/// Sink keeping files in memory, keyed by filename.
#[derive(Default)]
pub struct MemorySink {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn files(&self) -> HashMap<String, Vec<u8>> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn persist(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(filename.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Observer recording every delivered snapshot in order.
#[derive(Default)]
pub struct RecordingObserver {
    snapshots: Mutex<Vec<ProgressSnapshot>>,
}

impl RecordingObserver {
    pub fn snapshots(&self) -> Vec<ProgressSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressObserver for RecordingObserver {
    async fn on_snapshot(&self, snapshot: ProgressSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }
}
