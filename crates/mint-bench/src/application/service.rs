//! # Benchmark Driver
//!
//! Walks the run matrix one entry at a time: execute the tool, check its
//! exit status, append stdout to the entry's result file, parse the gas
//! receipt.
//!
//! Failed invocations never write to result files, so a result file only
//! ever contains output of successful mints.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bench_telemetry::{record_gas_used, record_invocation, InvocationOutcome};
use tracing::{debug, error, info, warn};

use crate::algorithms::{build_matrix, content_entry, parse_gas_receipt};
use crate::config::BenchConfig;
use crate::domain::{BenchError, FailedRun, MatrixEntry, PrivateKey, RunRecord, RunSummary};
use crate::ports::{BenchmarkApi, ResultSink, ToolRunner};

/// Lines of stderr kept in a `ToolFailed` error.
const STDERR_TAIL_LINES: usize = 5;

/// Benchmark driver - orchestrates the mint cost run.
pub struct BenchmarkDriver<R: ToolRunner, S: ResultSink> {
    /// Configuration.
    config: BenchConfig,
    /// External tool.
    runner: R,
    /// Result storage.
    sink: S,
}

impl<R: ToolRunner, S: ResultSink> BenchmarkDriver<R, S> {
    /// Create a new driver.
    pub fn new(config: BenchConfig, runner: R, sink: S) -> Self {
        Self {
            config,
            runner,
            sink,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Result sink in use.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Tool runner in use.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Write the summary as pretty JSON to
    /// `<results_dir>/summary-<YYYYmmddTHHMMSSZ>.json`.
    pub async fn persist_summary(&self, summary: &RunSummary) -> Result<PathBuf, BenchError> {
        let path = self.config.results_dir.join(format!(
            "summary-{}.json",
            summary.started_at.format("%Y%m%dT%H%M%SZ")
        ));
        let json = serde_json::to_string_pretty(summary)?;
        self.sink.write(&path, &json).await?;
        Ok(path)
    }

    /// Execute one entry and record its output.
    async fn execute(
        &self,
        entry: &MatrixEntry,
        credential: &PrivateKey,
    ) -> Result<RunRecord, BenchError> {
        let network = entry.network.name.as_str();
        let rendered = entry.invocation.render();
        debug!(network, length = entry.length, command = %rendered, "Invoking tool");

        let started = Instant::now();
        let result = self.runner.run(&entry.invocation, credential).await;
        let elapsed = started.elapsed();

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                let outcome = match e {
                    BenchError::Timeout { .. } => InvocationOutcome::Timeout,
                    _ => InvocationOutcome::Failed,
                };
                record_invocation(network, outcome, elapsed);
                return Err(e);
            }
        };

        if !output.success() {
            record_invocation(network, InvocationOutcome::Failed, elapsed);
            return Err(BenchError::ToolFailed {
                network: network.to_string(),
                length: entry.length,
                code: output.exit_code,
                stderr: output.stderr_tail(STDERR_TAIL_LINES),
            });
        }
        record_invocation(network, InvocationOutcome::Success, elapsed);

        if !output.stderr.trim().is_empty() {
            debug!(network, length = entry.length, stderr = %output.stderr.trim(), "Tool stderr");
        }

        self.sink.append(&entry.result_path, &output.stdout).await?;

        let receipt = parse_gas_receipt(&output.stdout);
        if let Some(gas) = receipt.gas_used {
            record_gas_used(network, entry.length, gas);
        }
        if receipt.status_ok == Some(false) {
            warn!(network, length = entry.length, "Transaction mined but reverted");
        }

        info!(
            network,
            length = entry.length,
            gas_used = ?receipt.gas_used,
            elapsed_ms = millis(elapsed),
            path = %entry.result_path.display(),
            "Mint recorded"
        );

        Ok(RunRecord {
            network: network.to_string(),
            title: entry.title.clone(),
            length: entry.length,
            invocation: rendered,
            output: output.stdout,
            exit_code: output.exit_code,
            duration_ms: millis(elapsed),
            receipt,
            result_path: entry.result_path.clone(),
        })
    }
}

#[async_trait]
impl<R: ToolRunner, S: ResultSink> BenchmarkApi for BenchmarkDriver<R, S> {
    fn plan(&self) -> Vec<MatrixEntry> {
        build_matrix(&self.config)
    }

    async fn run(&self, credential: &PrivateKey) -> Result<RunSummary, BenchError> {
        self.config.validate_for_run()?;

        let entries = self.plan();
        info!(
            entries = entries.len(),
            networks = self.config.networks.len(),
            keep_going = self.config.keep_going,
            "Starting mint cost run"
        );

        let mut summary = RunSummary::new();
        for entry in &entries {
            if entry.test_number == 1 {
                info!(network = %entry.network.name, "Chain");
            }
            info!(test = entry.test_number, length = entry.length, "Test");

            match self.execute(entry, credential).await {
                Ok(record) => summary.records.push(record),
                Err(e) if self.config.keep_going && e.is_recoverable() => {
                    warn!(network = %entry.network.name, length = entry.length, error = %e, "Invocation failed, continuing");
                    summary.failures.push(FailedRun {
                        network: entry.network.name.clone(),
                        length: entry.length,
                        error: e.to_string(),
                    });
                }
                Err(e) => {
                    error!(network = %entry.network.name, length = entry.length, error = %e, "Run aborted");
                    summary.failures.push(FailedRun {
                        network: entry.network.name.clone(),
                        length: entry.length,
                        error: e.to_string(),
                    });
                    summary.finish();
                    return Err(BenchError::Aborted {
                        summary: Box::new(summary),
                        source: Box::new(e),
                    });
                }
            }
        }
        summary.finish();

        info!(
            succeeded = summary.records.len(),
            failed = summary.failures.len(),
            "Run finished"
        );
        Ok(summary)
    }

    async fn mint_content(
        &self,
        content_key: &str,
        network: &str,
        credential: &PrivateKey,
    ) -> Result<RunRecord, BenchError> {
        self.config.validate()?;

        let item = self
            .config
            .content
            .get(content_key)
            .ok_or_else(|| BenchError::UnknownContent(content_key.to_string()))?;
        let profile = self
            .config
            .network(network)
            .ok_or_else(|| BenchError::UnknownNetwork(network.to_string()))?;
        profile.check_endpoint()?;

        info!(content = content_key, network, bytes = item.payload_len(), "Minting content item");
        self.execute(&content_entry(&self.config, item, profile), credential)
            .await
    }
}

/// Whole milliseconds, saturating.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
