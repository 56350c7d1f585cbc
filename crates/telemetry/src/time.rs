// Path: crates/telemetry/src/time.rs
//! Scope timing for engine runs.

use std::time::{Duration, Instant};

/// Logs the elapsed time of a scope at `debug` level when dropped.
pub struct ScopeTimer {
    scope: &'static str,
    start: Instant,
}

impl ScopeTimer {
    /// Starts timing `scope`.
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            start: Instant::now(),
        }
    }

    /// Time since the timer was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        tracing::debug!(
            target: "chaincap::timing",
            scope = self.scope,
            elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0,
            "scope finished"
        );
    }
}
