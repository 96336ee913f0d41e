//! # Run Records
//!
//! Planned matrix entries and what came back from executing them.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::invocation::Invocation;
use super::network::NetworkProfile;

/// One planned (network, length) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    /// Position in the whole run, 0-based.
    pub index: usize,
    /// Position within its network, 1-based.
    pub test_number: usize,
    /// Target network.
    pub network: NetworkProfile,
    /// Token name used for the mint and the result file.
    pub title: String,
    /// Payload length in characters.
    pub length: usize,
    /// What will be executed.
    pub invocation: Invocation,
    /// Where stdout is appended.
    pub result_path: PathBuf,
}

/// Gas figures parsed from a transaction receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GasReceipt {
    /// `gasUsed` field.
    pub gas_used: Option<u64>,
    /// `effectiveGasPrice` field, in wei.
    pub effective_gas_price: Option<u128>,
    /// `status` field, `true` for success.
    pub status_ok: Option<bool>,
    /// `transactionHash` field.
    pub transaction_hash: Option<String>,
}

impl GasReceipt {
    /// Transaction fee in wei, when both factors are known.
    pub fn cost_wei(&self) -> Option<u128> {
        let gas = u128::from(self.gas_used?);
        gas.checked_mul(self.effective_gas_price?)
    }
}

/// Outcome of one successful invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    /// Network name.
    pub network: String,
    /// Token name.
    pub title: String,
    /// Payload length.
    pub length: usize,
    /// Rendered, redacted command line.
    pub invocation: String,
    /// Captured stdout. Already in the result file.
    #[serde(skip)]
    pub output: String,
    /// Exit code of the tool.
    pub exit_code: Option<i32>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Parsed gas receipt.
    pub receipt: GasReceipt,
    /// Result file the output was appended to.
    pub result_path: PathBuf,
}

/// An invocation that failed during a `keep_going` run.
#[derive(Debug, Clone, Serialize)]
pub struct FailedRun {
    /// Network name.
    pub network: String,
    /// Payload length.
    pub length: usize,
    /// Error description.
    pub error: String,
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the last invocation finished.
    pub finished_at: Option<DateTime<Utc>>,
    /// Successful invocations in execution order.
    pub records: Vec<RunRecord>,
    /// Failed invocations in execution order.
    pub failures: Vec<FailedRun>,
}

impl RunSummary {
    /// Start an empty summary stamped with the current time.
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Stamp the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of invocations attempted.
    pub fn invocation_count(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    /// Whether every invocation succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Plain-text table of gas per (network, length).
    pub fn render_table(&self) -> String {
        let mut out = format!(
            "{:<12} {:>8} {:>12} {:>24}\n",
            "network", "length", "gas_used", "cost_wei"
        );
        for record in &self.records {
            let gas = record
                .receipt
                .gas_used
                .map_or_else(|| "-".to_string(), |g| g.to_string());
            let cost = record
                .receipt
                .cost_wei()
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            let _ = writeln!(
                out,
                "{:<12} {:>8} {:>12} {:>24}",
                record.network, record.length, gas, cost
            );
        }
        for failure in &self.failures {
            let _ = writeln!(
                out,
                "{:<12} {:>8} {:>12} {:>24}",
                failure.network, failure.length, "FAILED", "-"
            );
        }
        out
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
