// src/engine/core.rs

//! Per-cycle change detection.
//!
//! `WatchCore` owns everything that persists between cycles: the watch
//! paths, the ignore rules and the timestamp table. It has no channels, no
//! Tokio types and never runs commands, so it can be driven step by step in
//! tests against a mock filesystem.

use std::path::PathBuf;

use tracing::debug;

use crate::engine::CycleReport;
use crate::fs::FileSystem;
use crate::watch::{collect_files, IgnoreMatcher, MtimeTable};

#[derive(Debug)]
pub struct WatchCore {
    roots: Vec<PathBuf>,
    matcher: IgnoreMatcher,
    table: MtimeTable,
}

impl WatchCore {
    pub fn new(roots: Vec<PathBuf>, matcher: IgnoreMatcher) -> Self {
        Self {
            roots,
            matcher,
            table: MtimeTable::new(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn matcher(&self) -> &IgnoreMatcher {
        &self.matcher
    }

    /// Timestamp table (for tests and diagnostics).
    pub fn table(&self) -> &MtimeTable {
        &self.table
    }

    /// Run one scan-and-compare pass.
    ///
    /// Files whose modification time cannot be read after the scan listed
    /// them (typically deleted in between) are skipped for this cycle.
    pub fn poll(&mut self, fs: &dyn FileSystem) -> CycleReport {
        let files = collect_files(fs, &self.roots, &self.matcher);
        let mut changed = Vec::new();

        for path in &files {
            let mtime = match fs.modified(path) {
                Ok(t) => t,
                Err(err) => {
                    debug!(path = ?path, error = %err, "file vanished before stat");
                    continue;
                }
            };

            if self.table.observe(path, mtime) {
                changed.push(path.clone());
            }
        }

        debug!(scanned = files.len(), changed = changed.len(), "poll cycle complete");

        CycleReport {
            scanned: files.len(),
            changed,
        }
    }
}
