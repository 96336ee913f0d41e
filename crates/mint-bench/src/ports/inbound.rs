//! # Inbound Ports
//!
//! Operations the benchmark driver exposes to the CLI and tests.

use async_trait::async_trait;

use crate::domain::{BenchError, MatrixEntry, PrivateKey, RunRecord, RunSummary};

/// Benchmark driver API - inbound port.
#[async_trait]
pub trait BenchmarkApi: Send + Sync {
    /// Every (network, length) entry in run order. Executes nothing and
    /// needs no credential.
    fn plan(&self) -> Vec<MatrixEntry>;

    /// Execute the whole matrix sequentially.
    ///
    /// Configuration problems abort before the first invocation. Without
    /// `keep_going` the first failed invocation aborts the run with
    /// [`BenchError::Aborted`], which carries the summary recorded so far.
    async fn run(&self, credential: &PrivateKey) -> Result<RunSummary, BenchError>;

    /// Mint one content table item on one network.
    async fn mint_content(
        &self,
        content_key: &str,
        network: &str,
        credential: &PrivateKey,
    ) -> Result<RunRecord, BenchError>;
}
