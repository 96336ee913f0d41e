//! # Domain Errors
//!
//! Error types for the benchmark driver.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

use super::record::RunSummary;

/// Benchmark driver error types.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration was rejected before any invocation started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No credential was provided in the environment.
    #[error("Missing credential: set {var}")]
    MissingCredential {
        /// Environment variable that should hold the key
        var: String,
    },

    /// The credential is present but malformed. The value is never included.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Requested network is not in the network table.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Requested content key is not in the content table.
    #[error("Unknown content item: {0}")]
    UnknownContent(String),

    /// A payload URI could not be decoded.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The external tool could not be started.
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The external tool exited with a non-zero status.
    #[error("{network} length {length}: tool exited with {}: {stderr}", exit_label(.code))]
    ToolFailed {
        /// Network of the failed entry
        network: String,
        /// Payload length of the failed entry
        length: usize,
        /// Exit code, `None` if killed by a signal
        code: Option<i32>,
        /// Last lines of the tool's stderr
        stderr: String,
    },

    /// The external tool did not finish in time and was killed.
    #[error("{program} timed out after {secs}s")]
    Timeout {
        /// Program that was killed
        program: String,
        /// Configured limit in seconds
        secs: u64,
    },

    /// Result file I/O failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The signing key could not be sealed into or opened from a keystore.
    #[error("Keystore error: {0}")]
    Keystore(String),

    /// A run stopped early. Carries everything recorded before the failure.
    #[error("Run aborted after {} recorded mints: {source}", .summary.records.len())]
    Aborted {
        /// Records and failures up to and including the aborting one
        summary: Box<RunSummary>,
        /// The failure that stopped the run
        #[source]
        source: Box<BenchError>,
    },

    /// Run summary could not be serialized.
    #[error("Failed to serialize run summary: {0}")]
    Summary(#[from] serde_json::Error),
}

impl BenchError {
    /// Whether a `keep_going` run may record this error and continue.
    ///
    /// Only failures of a single invocation qualify. Anything that would
    /// fail the same way for every remaining entry aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ToolFailed { .. } | Self::Timeout { .. })
    }

    /// The underlying failure, looking through [`BenchError::Aborted`].
    pub fn root_cause(&self) -> &BenchError {
        match self {
            Self::Aborted { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Partial results of an aborted run.
    pub fn partial_summary(&self) -> Option<&RunSummary> {
        match self {
            Self::Aborted { summary, .. } => Some(&**summary),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "signal".to_string(),
    }
}
