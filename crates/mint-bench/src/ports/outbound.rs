//! # Outbound Ports
//!
//! Traits for the external transaction tool and result storage.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{BenchError, Invocation, PrivateKey};

/// Captured result of one tool execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl ToolOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Whether the tool exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Last `max_lines` non-empty lines of stderr, joined with `; `.
    pub fn stderr_tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self
            .stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("; ")
    }
}

/// External transaction tool - outbound port.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Execute the invocation with the credential available to the child as
    /// its signer, waiting for it to finish.
    async fn run(
        &self,
        invocation: &Invocation,
        credential: &PrivateKey,
    ) -> Result<ToolOutput, BenchError>;
}

/// Result storage - outbound port.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Append to a file, creating it and its parent directories.
    async fn append(&self, path: &Path, contents: &str) -> Result<(), BenchError>;

    /// Replace a file's contents, creating parent directories.
    async fn write(&self, path: &Path, contents: &str) -> Result<(), BenchError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock tool runner for testing.
///
/// Returns `stdout` for every call, or a failed output when any argument
/// equals `fail_on_arg`.
pub struct MockToolRunner {
    /// Stdout returned on success.
    pub stdout: String,
    /// Argument that triggers a failure.
    pub fail_on_arg: Option<String>,
    /// Every invocation seen, with the credential that accompanied it.
    pub calls: Mutex<Vec<(Invocation, String)>>,
}

impl MockToolRunner {
    /// Runner that always succeeds with `stdout`.
    pub fn succeeding(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            fail_on_arg: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail any invocation containing `arg`.
    #[must_use]
    pub fn failing_on(mut self, arg: impl Into<String>) -> Self {
        self.fail_on_arg = Some(arg.into());
        self
    }

    /// Invocations seen so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(inv, _)| inv.clone()).collect())
            .unwrap_or_default()
    }

    /// Raw credentials seen so far.
    pub fn credentials(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, key)| key.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ToolRunner for MockToolRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        credential: &PrivateKey,
    ) -> Result<ToolOutput, BenchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((invocation.clone(), credential.expose_hex()));
        }

        let fails = self
            .fail_on_arg
            .as_deref()
            .is_some_and(|arg| invocation.has_arg(arg));
        if fails {
            return Ok(ToolOutput {
                exit_code: Some(1),
                stdout: "partial output".to_string(),
                stderr: "Error: server returned an error response\n".to_string(),
            });
        }

        Ok(ToolOutput::ok(self.stdout.clone()))
    }
}

/// In-memory result sink for testing.
#[derive(Default)]
pub struct MemorySink {
    /// Appended (path, contents) pairs in order.
    pub appended: Mutex<Vec<(PathBuf, String)>>,
    /// Written (path, contents) pairs in order.
    pub written: Mutex<Vec<(PathBuf, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appended entries so far.
    pub fn appended(&self) -> Vec<(PathBuf, String)> {
        self.appended
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Written entries so far.
    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.written.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn append(&self, path: &Path, contents: &str) -> Result<(), BenchError> {
        if let Ok(mut appended) = self.appended.lock() {
            appended.push((path.to_path_buf(), contents.to_string()));
        }
        Ok(())
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<(), BenchError> {
        if let Ok(mut written) = self.written.lock() {
            written.push((path.to_path_buf(), contents.to_string()));
        }
        Ok(())
    }
}
