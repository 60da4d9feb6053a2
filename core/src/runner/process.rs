//! Subprocess transport for stage invocations.
//!
//! Each call spawns `<interpreter> <script_dir>/<script> <args...>`, waits for
//! exit under a deadline, and normalizes the outcome:
//! exit 0 + JSON stdout → the provider's envelope; exit 0 + empty stdout →
//! an empty envelope (treated as `{}`); non-zero exit → a failure envelope
//! carrying stderr (or a generic exit message); spawn failure or deadline →
//! an infrastructure error.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::StrategyConfig;
use crate::envelope::StageEnvelope;
use crate::error::StageError;

use super::traits::StageRunner;
use super::types::StageKind;

pub struct ProcessStageRunner {
    interpreter: String,
    script_dir: PathBuf,
    timeout: Duration,
}

impl ProcessStageRunner {
    pub fn new(cfg: &StrategyConfig) -> Self {
        Self {
            interpreter: cfg.interpreter_path.clone(),
            script_dir: PathBuf::from(&cfg.script_dir),
            timeout: Duration::from_millis(cfg.stage_timeout_ms),
        }
    }
}

#[async_trait]
impl StageRunner for ProcessStageRunner {
    async fn invoke(
        &self,
        stage: StageKind,
        args: &[String],
    ) -> Result<StageEnvelope, StageError> {
        let script = self.script_dir.join(stage.script());

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&script)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(stage = %stage, script = %script.display(), "invoking stage provider");

        let child = cmd
            .spawn()
            .map_err(|e| StageError::Spawn(format!("{}: {e}", stage.script())))?;

        // Dropping the wait future on timeout kills the child (kill_on_drop).
        let timeout_ms = self.timeout.as_millis() as u64;
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(res) => res?,
            Err(_) => {
                tracing::error!(stage = %stage, timeout_ms, "stage provider timed out");
                return Err(StageError::Timeout {
                    stage: stage.name(),
                    ms: timeout_ms,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!(
                    "{} exited with code {}",
                    stage.script(),
                    output.status.code().unwrap_or(-1)
                )
            } else {
                stderr.trim().to_string()
            };
            tracing::error!(stage = %stage, code = output.status.code(), error.message = %message, "stage provider failed");
            return Ok(StageEnvelope::fail(message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let body = stdout.trim();
        if body.is_empty() {
            tracing::warn!(stage = %stage, "stage provider succeeded with empty stdout");
        }
        let body = if body.is_empty() { "{}" } else { body };

        match serde_json::from_str::<StageEnvelope>(body) {
            Ok(envelope) => {
                tracing::debug!(stage = %stage, success = envelope.success, "stage provider answered");
                Ok(envelope)
            }
            Err(e) => Ok(StageEnvelope::fail(format!(
                "{} produced malformed output: {e}",
                stage.script()
            ))),
        }
    }
}
