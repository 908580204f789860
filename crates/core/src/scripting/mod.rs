//! External script execution.
//!
//! Executors for the python, shell, and binary runtimes share one
//! subprocess runner; [`invocation::ScriptInvoker`] sits on top and turns a
//! finished run into a JSON payload or a typed failure. All of this is pure
//! process management with no HTTP types.

pub mod binary;
pub mod executor;
pub mod interpreter;
pub mod invocation;
pub mod runtime;
pub mod subprocess;
