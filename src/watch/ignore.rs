// src/watch/ignore.rs

//! Gitignore-style exclusion rules.
//!
//! The rule set is the built-in list followed by the lines of an optional
//! user ignore file. Evaluation follows gitignore semantics: the last pattern
//! that matches decides, so a later `!pattern` re-includes a path excluded by
//! an earlier one.

use std::fmt;
use std::path::{Path, PathBuf};

use ::ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::errors::{FwatchError, Result};
use crate::fs::FileSystem;

/// Version-control metadata directories that are always ignored.
pub const BUILTIN_IGNORES: &[&str] = &[".git", ".github"];

/// Compiled ignore rules plus the directory they are anchored to.
#[derive(Clone)]
pub struct IgnoreMatcher {
    rules: Gitignore,
    /// Directory containing the user ignore file. Paths are made relative to
    /// it before matching.
    anchor: Option<PathBuf>,
}

impl fmt::Debug for IgnoreMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreMatcher")
            .field("anchor", &self.anchor)
            .field("rules", &self.rules.num_ignores())
            .field("whitelists", &self.rules.num_whitelists())
            .finish()
    }
}

impl IgnoreMatcher {
    /// Matcher with only the built-in rules and no anchor.
    pub fn builtin() -> Result<Self> {
        Self::from_lines(BUILTIN_IGNORES, None, std::iter::empty::<&str>())
    }

    /// Build the matcher from `builtin` patterns and, if given, the lines of
    /// the ignore file at `ignore_file`.
    ///
    /// The file must exist and be valid UTF-8; otherwise this fails with a
    /// configuration error. Its canonical parent directory becomes the anchor.
    pub fn new(
        fs: &dyn FileSystem,
        builtin: &[&str],
        ignore_file: Option<&Path>,
    ) -> Result<Self> {
        let Some(path) = ignore_file else {
            return Self::from_lines(builtin, None, std::iter::empty::<&str>());
        };

        let resolved = fs.canonicalize(path).map_err(|e| {
            FwatchError::config(format!("cannot open ignore file {:?}: {e:#}", path))
        })?;
        let contents = fs.read_to_string(&resolved).map_err(|e| {
            FwatchError::config(format!("cannot read ignore file {:?}: {e:#}", path))
        })?;

        let anchor = resolved.parent().map(Path::to_path_buf);
        Self::from_lines(builtin, anchor, contents.lines())
    }

    /// Build from in-memory pattern lines. `user_lines` are appended after
    /// `builtin` in order, so they may override it via negation.
    pub fn from_lines<'a, I>(builtin: &[&str], anchor: Option<PathBuf>, user_lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let root = anchor.clone().unwrap_or_else(|| PathBuf::from("/"));
        let mut builder = GitignoreBuilder::new(&root);

        for pat in builtin {
            builder
                .add_line(None, pat)
                .map_err(|e| FwatchError::config(format!("invalid built-in pattern {pat:?}: {e}")))?;
        }

        // Blank lines and `#` comments are handled by the builder.
        for line in user_lines {
            builder
                .add_line(None, line)
                .map_err(|e| FwatchError::config(format!("invalid ignore pattern {line:?}: {e}")))?;
        }

        let rules = builder
            .build()
            .map_err(|e| FwatchError::config(format!("failed to build ignore rules: {e}")))?;

        Ok(Self { rules, anchor })
    }

    /// Directory the user patterns are anchored to, if any.
    pub fn anchor(&self) -> Option<&Path> {
        self.anchor.as_deref()
    }

    /// Returns true if `path` is excluded.
    ///
    /// `is_dir` enables directory-only patterns (`build/`). Paths outside the
    /// anchor are matched as given.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let candidate = match &self.anchor {
            Some(anchor) => path.strip_prefix(anchor).unwrap_or(path),
            None => path,
        };

        if candidate.as_os_str().is_empty() {
            // The anchor directory itself.
            return false;
        }

        self.rules.matched(candidate, is_dir).is_ignore()
    }

    /// Like [`is_ignored`](Self::is_ignored), but a path also counts as
    /// excluded when one of its parent directories is.
    ///
    /// The scanner prunes ignored directories on the way down, so only watch
    /// roots need this; a root given as `build/out.bin` or `.git/hooks` would
    /// otherwise bypass the directory rule that covers it.
    pub fn is_ignored_or_parent(&self, path: &Path, is_dir: bool) -> bool {
        let candidate = match &self.anchor {
            Some(anchor) => path.strip_prefix(anchor).unwrap_or(path),
            None => path,
        };

        if candidate.as_os_str().is_empty() {
            return false;
        }

        if !candidate.has_root() {
            return self
                .rules
                .matched_path_or_any_parents(candidate, is_dir)
                .is_ignore();
        }

        // Absolute paths: walk up by hand, stopping short of `/`.
        let own = self.rules.matched(candidate, is_dir);
        if !own.is_none() {
            return own.is_ignore();
        }
        candidate
            .ancestors()
            .skip(1)
            .take_while(|dir| dir.parent().is_some())
            .map(|dir| self.rules.matched(dir, true))
            .find(|m| !m.is_none())
            .is_some_and(|m| m.is_ignore())
    }
}
