use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use relay_core::scripting::interpreter::DEFAULT_PYTHON_BIN;
use relay_core::scripting::invocation::ScriptInvoker;
use relay_core::scripting::runtime::{ScriptRuntime, RUNTIME_PYTHON};

/// Value of `APP_ENV` that selects hosted mode.
pub const PRODUCTION_ENV: &str = "production";

/// Whether the bundled listener should bind a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Standalone server bound to `HOST:PORT`.
    Local,
    /// Router is embedded by a host; the binary does not bind.
    Hosted,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("SCRIPT_RUNTIME must be one of python, shell, binary; got '{0}'")]
    UnknownRuntime(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "REQUEST_TIMEOUT_SECS ({request_secs}) must be greater than SCRIPT_TIMEOUT_SECS ({script_secs})"
    )]
    TimeoutOrder { script_secs: u64, request_secs: u64 },
}

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only through
/// [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3001`).
    pub port: u16,
    pub mode: ExecutionMode,
    /// Path to the generation script (default: `llm_service.py`).
    pub script_path: String,
    pub script_runtime: ScriptRuntime,
    /// Working directory for script processes (inherits ours if `None`).
    pub script_working_dir: Option<String>,
    /// Per-invocation script timeout in seconds (default: `120`).
    pub script_timeout_secs: u64,
    /// HTTP request timeout in seconds (default: `150`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `HOST`                 | `0.0.0.0`        |
    /// | `PORT`                 | `3001`           |
    /// | `APP_ENV`              | `development`    |
    /// | `SCRIPT_PATH`          | `llm_service.py` |
    /// | `SCRIPT_RUNTIME`       | `python`         |
    /// | `PYTHON_BIN`           | `python3`        |
    /// | `SCRIPT_WORKING_DIR`   | unset            |
    /// | `SCRIPT_TIMEOUT_SECS`  | `120`            |
    /// | `REQUEST_TIMEOUT_SECS` | `150`            |
    ///
    /// Both timeouts must be non-zero, and the request timeout must exceed
    /// the script timeout so a timed-out script still gets its 500.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("HOST", "IP address", var("HOST", "0.0.0.0"))?;
        let port = parse_var("PORT", "u16", var("PORT", "3001"))?;

        let mode = if var("APP_ENV", "development").trim() == PRODUCTION_ENV {
            ExecutionMode::Hosted
        } else {
            ExecutionMode::Local
        };

        let script_path = var("SCRIPT_PATH", "llm_service.py");

        let runtime_name = var("SCRIPT_RUNTIME", RUNTIME_PYTHON);
        let python_bin = var("PYTHON_BIN", DEFAULT_PYTHON_BIN);
        let script_runtime = ScriptRuntime::from_name(runtime_name.trim(), python_bin.trim())
            .ok_or(ConfigError::UnknownRuntime(runtime_name))?;

        let script_working_dir = lookup("SCRIPT_WORKING_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let script_timeout_secs =
            parse_var("SCRIPT_TIMEOUT_SECS", "u64", var("SCRIPT_TIMEOUT_SECS", "120"))?;
        let request_timeout_secs =
            parse_var("REQUEST_TIMEOUT_SECS", "u64", var("REQUEST_TIMEOUT_SECS", "150"))?;
        validate_timeouts(script_timeout_secs, request_timeout_secs)?;

        Ok(Self {
            host,
            port,
            mode,
            script_path,
            script_runtime,
            script_working_dir,
            script_timeout_secs,
            request_timeout_secs,
        })
    }

    /// The standalone listener only runs outside hosted mode.
    pub fn should_listen(&self) -> bool {
        self.mode == ExecutionMode::Local
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the invocation helper described by this configuration.
    pub fn script_invoker(&self) -> ScriptInvoker {
        ScriptInvoker::new(self.script_path.clone(), self.script_runtime.clone())
            .with_timeout(Duration::from_secs(self.script_timeout_secs))
            .with_working_directory(self.script_working_dir.clone())
    }
}

fn validate_timeouts(script_secs: u64, request_secs: u64) -> Result<(), ConfigError> {
    if script_secs == 0 {
        return Err(ConfigError::ZeroTimeout("SCRIPT_TIMEOUT_SECS"));
    }
    if request_secs == 0 {
        return Err(ConfigError::ZeroTimeout("REQUEST_TIMEOUT_SECS"));
    }
    if request_secs <= script_secs {
        return Err(ConfigError::TimeoutOrder {
            script_secs,
            request_secs,
        });
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
