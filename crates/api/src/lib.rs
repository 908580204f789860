//! Content relay API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests, the binary entrypoint, and hosts embedding the
//! router can all reach them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
