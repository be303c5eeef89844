// src/watch/mtimes.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::trace;

/// Last observed modification time per file.
///
/// Entries are never evicted: a file that disappears keeps its last value,
/// which only matters if the same path shows up again.
#[derive(Debug, Default)]
pub struct MtimeTable {
    seen: HashMap<PathBuf, SystemTime>,
}

impl MtimeTable {
    pub fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    /// Record `mtime` for `path` and report whether it counts as a change.
    ///
    /// A path seen for the first time is always a change. Otherwise only a
    /// strictly newer time is; equal or older times leave the table untouched.
    pub fn observe(&mut self, path: &Path, mtime: SystemTime) -> bool {
        match self.seen.get_mut(path) {
            Some(last) if mtime > *last => {
                trace!(?path, "mtime advanced");
                *last = mtime;
                true
            }
            Some(_) => false,
            None => {
                self.seen.insert(path.to_path_buf(), mtime);
                true
            }
        }
    }

    pub fn last_seen(&self, path: &Path) -> Option<SystemTime> {
        self.seen.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
