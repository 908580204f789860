//! The script invocation helper.
//!
//! [`ScriptInvoker`] runs the generation script once per call with
//! `[operation, argument]` and reduces the outcome to a single
//! `Result<Value, InvocationError>`:
//!
//! - non-zero exit: [`InvocationError::Execution`] with the stderr text
//! - zero exit, stdout not JSON: [`InvocationError::MalformedOutput`]
//! - zero exit, JSON with a truthy `error` field: [`InvocationError::Reported`]
//! - otherwise the parsed JSON, verbatim
//!
//! Every invocation owns its child process and buffers; nothing is shared
//! between concurrent calls.

use std::time::Duration;

use serde_json::Value;

use super::executor::{ScriptError, ScriptInput, ScriptOutput};
use super::runtime::ScriptRuntime;
use crate::error::CoreError;
use crate::operation::Operation;

/// Default per-invocation timeout.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// One validated call: which operation to run and its single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    operation: Operation,
    argument: String,
}

impl InvocationRequest {
    /// Build a request, rejecting an empty argument.
    pub fn new(operation: Operation, argument: impl Into<String>) -> Result<Self, CoreError> {
        let argument = argument.into();
        if argument.is_empty() {
            return Err(CoreError::Validation(format!(
                "{operation} requires a non-empty argument"
            )));
        }
        Ok(Self {
            operation,
            argument,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The script's argument vector: operation name, then the argument.
    pub fn args(&self) -> Vec<String> {
        vec![self.operation.as_str().to_string(), self.argument.clone()]
    }
}

/// Why an invocation did not produce a result.
///
/// The `Display` text is what callers see; process details beyond the
/// script's own stderr or error text are only logged.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// The script exited non-zero (or was killed by a signal).
    #[error("{message}")]
    Execution {
        exit_code: Option<i32>,
        message: String,
    },

    /// The script exited zero but stdout was not a JSON document.
    #[error("Failed to parse script output: {0}")]
    MalformedOutput(String),

    /// The script's JSON output carried an `error` field.
    #[error("{0}")]
    Reported(String),

    /// The script did not exit within the configured timeout.
    #[error("Script timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The script could not be started at all.
    #[error("Failed to run script")]
    Unavailable(#[source] ScriptError),
}

impl From<ScriptError> for InvocationError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::Timeout { elapsed_ms } => Self::Timeout { elapsed_ms },
            other => Self::Unavailable(other),
        }
    }
}

/// Reduce a finished script's output to its JSON payload or a failure.
pub fn reconcile(output: &ScriptOutput) -> Result<Value, InvocationError> {
    if !output.success() {
        return Err(InvocationError::Execution {
            exit_code: output.exit_code,
            message: execution_message(output.exit_code, &output.stderr),
        });
    }

    let value: Value = serde_json::from_str(&output.stdout)
        .map_err(|e| InvocationError::MalformedOutput(e.to_string()))?;

    if let Some(message) = reported_error(&value) {
        return Err(InvocationError::Reported(message));
    }

    Ok(value)
}

fn execution_message(exit_code: Option<i32>, stderr: &str) -> String {
    let head = match exit_code {
        Some(code) => format!("Script failed with exit code {code}"),
        None => "Script was terminated by a signal".to_string(),
    };
    let stderr = stderr.trim();
    if stderr.is_empty() {
        head
    } else {
        format!("{head}: {stderr}")
    }
}

/// The message of a truthy top-level `error` field, if any.
///
/// `null`, `false`, `0` and `""` count as absent. Non-string values are
/// rendered as JSON text.
fn reported_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Runs the generation script, one child process per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvoker {
    script_path: String,
    runtime: ScriptRuntime,
    working_directory: Option<String>,
    timeout: Duration,
}

impl ScriptInvoker {
    pub fn new(script_path: impl Into<String>, runtime: ScriptRuntime) -> Self {
        Self {
            script_path: script_path.into(),
            runtime,
            working_directory: None,
            timeout: DEFAULT_SCRIPT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_working_directory(mut self, dir: Option<String>) -> Self {
        self.working_directory = dir;
        self
    }

    /// Run the script for `request` and reconcile its outcome.
    pub async fn invoke(&self, request: &InvocationRequest) -> Result<Value, InvocationError> {
        let operation = request.operation();
        let input = ScriptInput {
            args: request.args(),
            working_directory: self.working_directory.clone(),
            timeout: self.timeout,
        };

        tracing::debug!(%operation, script = %self.script_path, runtime = %self.runtime, "Invoking script");

        let output = match self.runtime.execute(&self.script_path, input).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(%operation, error = %e, "Script invocation failed");
                return Err(e.into());
            }
        };

        if !output.success() {
            tracing::error!(
                %operation,
                exit_code = ?output.exit_code,
                stderr = %output.stderr,
                "Script exited with failure"
            );
        } else if !output.stderr.is_empty() {
            tracing::warn!(%operation, stderr = %output.stderr, "Script wrote to stderr");
        }

        let result = reconcile(&output);
        match &result {
            Ok(_) => tracing::debug!(%operation, duration_ms = output.duration_ms, "Script completed"),
            Err(InvocationError::MalformedOutput(msg)) => {
                tracing::error!(%operation, error = %msg, "Script output is not valid JSON");
            }
            Err(InvocationError::Reported(msg)) => {
                tracing::warn!(%operation, error = %msg, "Script reported an error");
            }
            Err(_) => {}
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
