// src/watch/scanner.rs

//! Recursive enumeration of the watched files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{FwatchError, Result};
use crate::fs::{EntryKind, FileSystem};
use crate::watch::ignore::IgnoreMatcher;

/// Collect every non-ignored regular file reachable from `roots`.
///
/// Roots are canonicalized on every call since they may appear or disappear
/// between cycles. A root inside an ignored directory yields nothing, and an
/// ignored directory is never descended into. Symlinks
/// below a root, special files and entries that cannot be read are left out
/// of the result.
pub fn collect_files(
    fs: &dyn FileSystem,
    roots: &[PathBuf],
    matcher: &IgnoreMatcher,
) -> BTreeSet<PathBuf> {
    let mut files = BTreeSet::new();
    let mut stack = Vec::with_capacity(roots.len());

    for root in roots {
        let resolved = match fs.canonicalize(root) {
            Ok(resolved) => resolved,
            Err(err) => {
                debug!(root = ?root, error = %err, "skipping unresolvable watch path");
                continue;
            }
        };

        let is_dir = matches!(fs.entry_kind(&resolved), Ok(EntryKind::Dir));
        if matcher.is_ignored_or_parent(&resolved, is_dir) {
            debug!(root = ?resolved, "watch path is covered by an ignore rule");
            continue;
        }
        stack.push(resolved);
    }

    // Reverse so roots are visited in the order given.
    stack.reverse();

    while let Some(path) = stack.pop() {
        let kind = match fs.entry_kind(&path) {
            Ok(kind) => kind,
            Err(err) => {
                debug!(path = ?path, error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if matcher.is_ignored(&path, kind == EntryKind::Dir) {
            trace!(path = ?path, "ignored");
            continue;
        }

        match kind {
            EntryKind::File => {
                files.insert(path);
            }
            EntryKind::Dir => match fs.read_dir(&path) {
                Ok(mut children) => {
                    // Descending sort so the stack pops in ascending order.
                    children.sort_unstable_by(|a, b| b.cmp(a));
                    stack.extend(children);
                }
                Err(err) => debug!(path = ?path, error = %err, "skipping unreadable directory"),
            },
            EntryKind::Symlink | EntryKind::Other => {
                trace!(path = ?path, ?kind, "skipping non-regular entry");
            }
        }
    }

    files
}

/// Resolve every watch path once, failing if any of them does not exist.
///
/// Used at startup; later cycles tolerate missing roots.
pub fn resolve_roots(fs: &dyn FileSystem, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    roots
        .iter()
        .map(|root| resolve_root(fs, root))
        .collect()
}

fn resolve_root(fs: &dyn FileSystem, root: &Path) -> Result<PathBuf> {
    fs.canonicalize(root)
        .map_err(|e| FwatchError::config(format!("cannot resolve watch path {:?}: {e:#}", root)))
}
