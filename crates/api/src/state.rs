use std::sync::Arc;

use relay_core::scripting::invocation::ScriptInvoker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Immutable after startup and cheaply cloneable; concurrent requests share
/// nothing mutable through it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Runs the generation script, one child process per call.
    pub invoker: Arc<ScriptInvoker>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let invoker = config.script_invoker();
        Self {
            config: Arc::new(config),
            invoker: Arc::new(invoker),
        }
    }
}
