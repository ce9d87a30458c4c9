//! Storage sink capability: persist named bytes.
//!
//! Unifies the concrete save backends behind one interface; the orchestrator
//! stays agnostic to which is active. Implementations must tolerate
//! concurrent writes of distinct filenames.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// Capability to persist a downloaded body under a filename.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn persist(&self, filename: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Sink writing each file into a target directory, created on first use.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl Sink for DirSink {
    async fn persist(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(filename), bytes).await
    }
}
