//! Script runtime selection.
//!
//! A [`ScriptRuntime`] names how the generation script is launched and
//! dispatches to the matching executor.

use std::fmt;

use super::binary::BinaryExecutor;
use super::executor::{ScriptError, ScriptExecutor, ScriptInput, ScriptOutput};
use super::interpreter::{InterpreterExecutor, DEFAULT_PYTHON_BIN};

/// Python runtime (executed via `python3`, or a configured interpreter).
pub const RUNTIME_PYTHON: &str = "python";

/// Shell runtime (executed via `bash`).
pub const RUNTIME_SHELL: &str = "shell";

/// Pre-compiled or shebang-carrying executable (executed directly).
pub const RUNTIME_BINARY: &str = "binary";

/// How the script file is turned into a running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptRuntime {
    Python { interpreter: String },
    Shell,
    Binary,
}

impl Default for ScriptRuntime {
    fn default() -> Self {
        Self::Python {
            interpreter: DEFAULT_PYTHON_BIN.to_string(),
        }
    }
}

impl ScriptRuntime {
    /// Resolve a runtime by its configuration name.
    ///
    /// `python_bin` is only used by the python runtime. Returns `None` for
    /// unknown names.
    pub fn from_name(name: &str, python_bin: &str) -> Option<Self> {
        match name {
            RUNTIME_PYTHON => Some(Self::Python {
                interpreter: python_bin.to_string(),
            }),
            RUNTIME_SHELL => Some(Self::Shell),
            RUNTIME_BINARY => Some(Self::Binary),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Python { .. } => RUNTIME_PYTHON,
            Self::Shell => RUNTIME_SHELL,
            Self::Binary => RUNTIME_BINARY,
        }
    }

    /// Run `script_path` with the executor for this runtime.
    pub async fn execute(
        &self,
        script_path: &str,
        input: ScriptInput,
    ) -> Result<ScriptOutput, ScriptError> {
        match self {
            Self::Python { interpreter } => {
                InterpreterExecutor::new(interpreter.as_str())
                    .execute(script_path, input)
                    .await
            }
            Self::Shell => {
                InterpreterExecutor::shell()
                    .execute(script_path, input)
                    .await
            }
            Self::Binary => BinaryExecutor.execute(script_path, input).await,
        }
    }
}

impl fmt::Display for ScriptRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python { interpreter } => write!(f, "{RUNTIME_PYTHON} ({interpreter})"),
            other => f.write_str(other.name()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
