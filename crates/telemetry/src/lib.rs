// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Capability Configuration Telemetry
//!
//! Structured logging initialization for the binaries and a scope timer the
//! engine uses to report how long per-node resolution takes.

/// The initialization routine for global structured logging.
pub mod init;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

pub use init::{init_tracing, init_tracing_with, LogFormat};
pub use time::ScopeTimer;
