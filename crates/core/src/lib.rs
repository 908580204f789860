//! Domain logic for the content relay.
//!
//! Everything here is free of HTTP concerns: the generation operations,
//! the script executors, and the invocation helper that reduces one
//! script run to a typed result.

pub mod error;
pub mod operation;
pub mod scripting;
