// src/engine/mod.rs

//! Poll loop for fwatch.
//!
//! Each cycle scans the watch paths, compares modification times against the
//! timestamp table, runs the update command once if anything changed, then
//! sleeps for the poll interval. The loop only ends on a shutdown request or
//! after `max_cycles`.
//!
//! The per-cycle state machine lives in [`core`]; the async/IO shell
//! (update command, sleeping, shutdown) is implemented in [`runtime`].

use std::path::PathBuf;
use std::time::Duration;

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_RATE_MS: u64 = 1000;

/// Runtime options used by the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Sleep between the end of one cycle and the start of the next.
    pub poll_interval: Duration,
    /// Stop after this many cycles (used for `--once`). `None` runs until
    /// shutdown.
    pub max_cycles: Option<u64>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_RATE_MS),
            max_cycles: None,
        }
    }
}

/// Events flowing into the runtime from outside the loop.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// What one poll cycle found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Number of files the scan returned.
    pub scanned: usize,
    /// Files whose modification time advanced (or that were new), in scan order.
    pub changed: Vec<PathBuf>,
}

impl CycleReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Totals returned when the runtime stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub updates: u64,
    pub failed_updates: u64,
}

pub mod core;
pub mod runtime;

pub use self::core::WatchCore;
pub use self::runtime::Runtime;
