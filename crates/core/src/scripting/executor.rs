//! Unified script execution interface and shared types.
//!
//! Defines [`ScriptExecutor`], the trait that all runtime executors implement,
//! along with [`ScriptInput`], [`ScriptOutput`], and [`ScriptError`].

use std::time::Duration;

/// Input passed to a script executor.
#[derive(Debug, Clone)]
pub struct ScriptInput {
    /// Arguments appended after the script path, in order.
    pub args: Vec<String>,
    /// Working directory for the child process (uses current dir if `None`).
    pub working_directory: Option<String>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

impl ScriptInput {
    /// Input with the given arguments and timeout, running in the current
    /// directory.
    pub fn new(args: Vec<String>, timeout: Duration) -> Self {
        Self {
            args,
            working_directory: None,
            timeout,
        }
    }
}

/// Captured output from a finished script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Complete stdout, concatenated in arrival order.
    pub stdout: String,
    /// Complete stderr, captured independently of stdout.
    pub stderr: String,
    /// Process exit code, or `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScriptOutput {
    /// Whether the process exited normally with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Errors that prevent a script from producing a [`ScriptOutput`].
///
/// A script that runs and exits non-zero is *not* an error at this level;
/// the exit code is reported in the output and judged by the caller.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script file was not found at the specified path.
    #[error("Script not found: {0}")]
    NotFound(String),

    /// The script file exists but lacks execute permissions.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The script exceeded its timeout and was killed.
    #[error("Script timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed wall-clock time before the process was killed.
        elapsed_ms: u64,
    },

    /// The process could not be started.
    #[error("Failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting on the running process failed.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

/// Trait implemented by all script runtime executors (python, shell, binary).
///
/// Each executor receives a file path and structured input, spawns the
/// appropriate subprocess, and returns captured output or an error.
pub trait ScriptExecutor: Send + Sync {
    /// Execute the script at `script_path` with the given `input`.
    fn execute(
        &self,
        script_path: &str,
        input: ScriptInput,
    ) -> impl std::future::Future<Output = Result<ScriptOutput, ScriptError>> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
