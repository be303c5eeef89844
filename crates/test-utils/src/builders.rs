#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use fwatch::config::{RawSettings, WatchSettings};
use fwatch::engine::{Runtime, RuntimeEvent, RuntimeOptions, WatchCore, DEFAULT_POLL_RATE_MS};
use fwatch::exec::{UpdateBackend, UpdateCommand};
use fwatch::fs::FileSystem;
use fwatch::watch::IgnoreMatcher;

/// Builder for `WatchSettings` to simplify test setup.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings {
                paths: Vec::new(),
                poll_rate_ms: DEFAULT_POLL_RATE_MS,
                on_update: None,
                gitignore: None,
            },
        }
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.paths.push(path.into());
        self
    }

    pub fn poll_rate(mut self, ms: u64) -> Self {
        self.raw.poll_rate_ms = ms;
        self
    }

    pub fn on_update(mut self, cmd: &str) -> Self {
        self.raw.on_update = Some(cmd.to_string());
        self
    }

    pub fn gitignore(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.gitignore = Some(path.into());
        self
    }

    pub fn build(self) -> WatchSettings {
        WatchSettings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble a `Runtime` over `fs` that polls every millisecond.
///
/// Returns the sender for shutdown events alongside the runtime; dropping it
/// is fine, the runtime then simply never sees a shutdown.
pub fn fast_runtime<B: UpdateBackend>(
    fs: Arc<dyn FileSystem>,
    roots: Vec<PathBuf>,
    matcher: IgnoreMatcher,
    update: Option<&str>,
    backend: B,
    max_cycles: Option<u64>,
) -> (Runtime<B>, mpsc::Sender<RuntimeEvent>) {
    let (tx, rx) = mpsc::channel(4);
    let update = update.map(|cmd| UpdateCommand::parse(cmd).expect("valid update command"));
    let options = RuntimeOptions {
        poll_interval: Duration::from_millis(1),
        max_cycles,
    };

    let runtime = Runtime::new(WatchCore::new(roots, matcher), fs, update, backend, rx, options);
    (runtime, tx)
}
