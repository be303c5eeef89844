// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::exec::UpdateCommand;

/// Optional settings file, read with `--config`.
///
/// ```toml
/// [watch]
/// paths = ["src", "Cargo.toml"]
/// poll_rate = 500
/// on_update = "cargo test"
/// gitignore = ".gitignore"
/// ```
///
/// Every key is optional. Relative paths are resolved against the directory
/// containing the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Files or directories to watch.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Poll interval in milliseconds.
    #[serde(default)]
    pub poll_rate: Option<u64>,

    /// Command to run when a change is detected.
    #[serde(default)]
    pub on_update: Option<String>,

    /// Gitignore-style file with extra exclusion rules.
    #[serde(default)]
    pub gitignore: Option<PathBuf>,
}

/// Settings after merging the CLI with the optional config file, before
/// validation.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub paths: Vec<PathBuf>,
    pub poll_rate_ms: u64,
    pub on_update: Option<String>,
    pub gitignore: Option<PathBuf>,
}

/// Validated settings for one fwatch process.
///
/// Can only be obtained through `TryFrom<RawSettings>`, so holding one means
/// there is at least one watch path, a non-zero interval and a well-formed
/// update command.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    paths: Vec<PathBuf>,
    poll_interval: Duration,
    on_update: Option<UpdateCommand>,
    gitignore: Option<PathBuf>,
}

impl WatchSettings {
    pub(crate) fn new_unchecked(
        paths: Vec<PathBuf>,
        poll_interval: Duration,
        on_update: Option<UpdateCommand>,
        gitignore: Option<PathBuf>,
    ) -> Self {
        Self {
            paths,
            poll_interval,
            on_update,
            gitignore,
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn on_update(&self) -> Option<&UpdateCommand> {
        self.on_update.as_ref()
    }

    pub fn gitignore(&self) -> Option<&PathBuf> {
        self.gitignore.as_ref()
    }
}
