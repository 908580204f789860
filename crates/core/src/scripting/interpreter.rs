//! Interpreter-hosted script executor.
//!
//! Runs `<interpreter> <script_path> <args...>`. Used for both the python
//! runtime (`python3` or a configured interpreter) and the shell runtime
//! (`bash`).

use tokio::process::Command;

use super::executor::{ScriptError, ScriptExecutor, ScriptInput, ScriptOutput};
use super::subprocess;

/// Default interpreter for the python runtime.
pub const DEFAULT_PYTHON_BIN: &str = "python3";

/// Interpreter for the shell runtime.
pub const SHELL_BIN: &str = "bash";

/// Executor that hands the script file to an interpreter program.
#[derive(Debug, Clone)]
pub struct InterpreterExecutor {
    program: String,
}

impl InterpreterExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executor running scripts through `bash`.
    pub fn shell() -> Self {
        Self::new(SHELL_BIN)
    }
}

impl ScriptExecutor for InterpreterExecutor {
    async fn execute(
        &self,
        script_path: &str,
        input: ScriptInput,
    ) -> Result<ScriptOutput, ScriptError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(script_path);
        subprocess::run_command(&mut cmd, input).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
