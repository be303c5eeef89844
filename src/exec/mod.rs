// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] splits the user's update command into an argument vector.
//! - [`backend`] provides the `UpdateBackend` trait and the concrete
//!   `ProcessBackend` that the runtime uses in production, and which tests
//!   can replace with a fake implementation.

pub mod backend;
pub mod command;

pub use backend::{ProcessBackend, UpdateBackend, UpdateOutcome};
pub use command::{split_words, UpdateCommand};
