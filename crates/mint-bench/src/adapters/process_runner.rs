//! Process-backed [`ToolRunner`].

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::{BenchError, Invocation, PrivateKey};
use crate::ports::{ToolOutput, ToolRunner};

use super::signer_files::SignerFiles;

/// Spawns the tool directly (no shell) and captures its output.
///
/// The signer reaches the child as a freshly sealed keystore plus password
/// file, named by the invocation's [`SignerEnv`](crate::domain::SignerEnv)
/// variables. Both files are deleted once the child has exited. The child
/// is killed if the timeout expires or the future is dropped.
#[derive(Debug, Clone, Default)]
pub struct ProcessToolRunner {
    timeout: Option<Duration>,
}

impl ProcessToolRunner {
    /// Runner without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-invocation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ToolRunner for ProcessToolRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        credential: &PrivateKey,
    ) -> Result<ToolOutput, BenchError> {
        let spawn_error = |source| BenchError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let signer = SignerFiles::create(credential).await?;

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .env(&invocation.signer.keystore_env, signer.keystore_path())
            .env(&invocation.signer.password_env, signer.password_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        debug!(pid = ?child.id(), program = %invocation.program, "Tool spawned");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| BenchError::Timeout {
                    program: invocation.program.clone(),
                    secs: limit.as_secs(),
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(spawn_error)?;
        drop(signer);

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
