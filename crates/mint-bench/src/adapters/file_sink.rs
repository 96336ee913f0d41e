//! Filesystem-backed [`ResultSink`].

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::domain::BenchError;
use crate::ports::ResultSink;

/// Writes result files, creating directories on demand.
///
/// No locking: each (network, name, length) has its own file and the
/// driver runs sequentially.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResultSink;

impl FileResultSink {
    /// Create a sink.
    pub fn new() -> Self {
        Self
    }
}

async fn ensure_parent(path: &Path) -> Result<(), BenchError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .await
            .map_err(|e| BenchError::io(parent, e)),
        _ => Ok(()),
    }
}

#[async_trait]
impl ResultSink for FileResultSink {
    async fn append(&self, path: &Path, contents: &str) -> Result<(), BenchError> {
        ensure_parent(path).await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| BenchError::io(path, e))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| BenchError::io(path, e))?;
        file.flush().await.map_err(|e| BenchError::io(path, e))
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), BenchError> {
        ensure_parent(path).await?;
        fs::write(path, contents)
            .await
            .map_err(|e| BenchError::io(path, e))
    }
}
