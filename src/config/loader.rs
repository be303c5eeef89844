// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, RawSettings, WatchSettings};
use crate::engine::DEFAULT_POLL_RATE_MS;
use crate::errors::{FwatchError, Result};

/// Load a settings file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; relative paths are left as
/// written. Use [`resolve_settings`] for the full merge + validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        FwatchError::config(format!("cannot read config file {:?}: {e}", path))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Build validated settings from the command line and, if `--config` was
/// given, the settings file.
///
/// - CLI paths replace the file's `paths` when any are given.
/// - `--poll-rate`, `--on-update` and `--gitignore` override the file.
/// - Relative paths from the file are resolved against its directory.
pub fn resolve_settings(args: &CliArgs) -> Result<WatchSettings> {
    let file = match &args.config {
        Some(path) => {
            let mut raw = load_from_path(path)?;
            anchor_paths(&mut raw, &config_dir(path));
            raw
        }
        None => RawConfigFile::default(),
    };

    let raw = merge(args, file);
    WatchSettings::try_from(raw)
}

fn merge(args: &CliArgs, file: RawConfigFile) -> RawSettings {
    let section = file.watch;

    RawSettings {
        paths: if args.paths.is_empty() {
            section.paths
        } else {
            args.paths.clone()
        },
        poll_rate_ms: args
            .poll_rate
            .or(section.poll_rate)
            .unwrap_or(DEFAULT_POLL_RATE_MS),
        on_update: args.on_update.clone().or(section.on_update),
        gitignore: args.gitignore.clone().or(section.gitignore),
    }
}

/// Directory a config file's relative paths are interpreted against.
///
/// A bare filename like `fwatch.toml` (parent = "") maps to ".".
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn anchor_paths(raw: &mut RawConfigFile, base: &Path) {
    for path in raw.watch.paths.iter_mut() {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    }
    if let Some(path) = raw.watch.gitignore.as_mut() {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    }
}
