//! Binary executable executor.
//!
//! Runs the script directly (not through an interpreter). Validates that
//! the file exists and has execute permissions before spawning.

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use tokio::process::Command;

use super::executor::{ScriptError, ScriptExecutor, ScriptInput, ScriptOutput};
use super::subprocess;

/// Executor for scripts that are directly executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryExecutor;

impl ScriptExecutor for BinaryExecutor {
    async fn execute(
        &self,
        binary_path: &str,
        input: ScriptInput,
    ) -> Result<ScriptOutput, ScriptError> {
        let metadata = tokio::fs::metadata(binary_path)
            .await
            .map_err(|_| ScriptError::NotFound(binary_path.to_string()))?;

        #[cfg(unix)]
        {
            let mode = metadata.permissions().mode();
            if mode & 0o111 == 0 {
                return Err(ScriptError::PermissionDenied(format!(
                    "{binary_path} is not executable (mode {mode:#o})"
                )));
            }
        }
        #[cfg(not(unix))]
        let _ = metadata;

        let mut cmd = Command::new(binary_path);
        subprocess::run_command(&mut cmd, input).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
