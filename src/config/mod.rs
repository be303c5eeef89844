// src/config/mod.rs

//! Configuration loading and validation for fwatch.
//!
//! Responsibilities:
//! - Define the optional TOML settings file and the settings types (`model.rs`).
//! - Load the file and merge it with the command line (`loader.rs`).
//! - Validate the merged settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, resolve_settings};
pub use model::{RawConfigFile, RawSettings, WatchSection, WatchSettings};
