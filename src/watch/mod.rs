// src/watch/mod.rs

//! Polling-based change detection.
//!
//! This module is responsible for:
//! - Compiling the gitignore-style exclusion rules ([`ignore`]).
//! - Enumerating the non-ignored files under the watch paths ([`scanner`]).
//! - Remembering the last modification time of every file seen ([`mtimes`]).
//!
//! It does **not** run commands or sleep; the poll loop lives in
//! [`crate::engine`].

pub mod ignore;
pub mod mtimes;
pub mod scanner;

pub use self::ignore::{IgnoreMatcher, BUILTIN_IGNORES};
pub use mtimes::MtimeTable;
pub use scanner::{collect_files, resolve_roots};
