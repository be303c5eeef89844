// tests/scanner_ignore.rs

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use fwatch::errors::FwatchError;
use fwatch::fs::RealFileSystem;
use fwatch::watch::{collect_files, IgnoreMatcher, BUILTIN_IGNORES};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Temp project with a canonical root path (macOS tempdirs live behind a symlink).
fn project() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    (dir, root)
}

fn relative(root: &Path, files: &BTreeSet<PathBuf>) -> Vec<String> {
    files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn negation_reincludes_one_path_under_builtin_directory() {
    let (_dir, root) = project();
    write(&root, ".github/workflows/ci.yml", "on: push");
    write(&root, ".github/CODEOWNERS", "* @me");
    write(&root, ".github/dependabot.yml", "version: 2");
    write(&root, ".git/HEAD", "ref: refs/heads/main");
    write(&root, "src/main.rs", "fn main() {}");
    write(
        &root,
        ".gitignore",
        "# let one file through\n!.github/\n.github/*\n!.github/dependabot.yml\n",
    );

    let matcher =
        IgnoreMatcher::new(&RealFileSystem, BUILTIN_IGNORES, Some(&root.join(".gitignore"))).unwrap();
    let files = collect_files(&RealFileSystem, &[root.clone()], &matcher);

    assert_eq!(
        relative(&root, &files),
        vec![".github/dependabot.yml", ".gitignore", "src/main.rs"]
    );
}

#[test]
fn ignored_directory_contents_are_never_reported() {
    let (_dir, root) = project();
    write(&root, "build/out.bin", "v1");
    write(&root, "src/lib.rs", "pub fn a() {}");
    write(&root, ".gitignore", "build/\n");

    let matcher =
        IgnoreMatcher::new(&RealFileSystem, BUILTIN_IGNORES, Some(&root.join(".gitignore"))).unwrap();

    let first = collect_files(&RealFileSystem, &[root.clone()], &matcher);
    write(&root, "build/out.bin", "v2");
    write(&root, "build/new.bin", "new");
    let second = collect_files(&RealFileSystem, &[root.clone()], &matcher);

    for files in [&first, &second] {
        assert!(files.iter().all(|p| !p.starts_with(root.join("build"))));
    }
    assert_eq!(first, second);
}

#[test]
fn relative_watch_paths_resolve_against_the_anchor() {
    let (_dir, root) = project();
    write(&root, "docs/guide.md", "guide");
    write(&root, "docs/draft.tmp", "draft");
    write(&root, ".gitignore", "/docs/*.tmp\n");

    let matcher =
        IgnoreMatcher::new(&RealFileSystem, BUILTIN_IGNORES, Some(&root.join(".gitignore"))).unwrap();
    assert_eq!(matcher.anchor(), Some(root.as_path()));

    let files = collect_files(&RealFileSystem, &[root.join("docs")], &matcher);
    assert_eq!(relative(&root, &files), vec!["docs/guide.md"]);
}

#[test]
fn repeated_scans_of_a_static_tree_are_identical() {
    let (_dir, root) = project();
    for i in 0..20 {
        write(&root, &format!("d{}/f{}.txt", i % 4, i), "x");
    }

    let matcher = IgnoreMatcher::builtin().unwrap();
    let a = collect_files(&RealFileSystem, &[root.clone()], &matcher);
    let b = collect_files(&RealFileSystem, &[root.clone()], &matcher);

    assert_eq!(a.len(), 20);
    assert_eq!(a, b);
}

#[test]
fn missing_ignore_file_is_a_config_error() {
    let (_dir, root) = project();

    let err = IgnoreMatcher::new(&RealFileSystem, BUILTIN_IGNORES, Some(&root.join("nope")))
        .unwrap_err();
    assert!(matches!(err, FwatchError::ConfigError(msg) if msg.contains("ignore file")));
}

#[test]
fn non_utf8_ignore_file_is_a_config_error() {
    let (_dir, root) = project();
    fs::write(root.join(".gitignore"), [0xff, 0xfe, b'\n']).unwrap();

    let err = IgnoreMatcher::new(&RealFileSystem, BUILTIN_IGNORES, Some(&root.join(".gitignore")))
        .unwrap_err();
    assert!(matches!(err, FwatchError::ConfigError(_)));
}

#[cfg(unix)]
#[test]
fn symlinks_below_a_root_are_skipped() {
    let (_dir, root) = project();
    write(&root, "real/file.txt", "x");
    std::os::unix::fs::symlink(root.join("real"), root.join("loop")).unwrap();
    std::os::unix::fs::symlink(root.join("real/file.txt"), root.join("alias.txt")).unwrap();

    let matcher = IgnoreMatcher::builtin().unwrap();
    let files = collect_files(&RealFileSystem, &[root.clone()], &matcher);

    assert_eq!(relative(&root, &files), vec!["real/file.txt"]);
}

#[test]
fn watch_paths_inside_ignored_directories_yield_nothing() {
    let (_dir, root) = project();
    write(&root, "build/out.bin", "v1");
    write(&root, ".git/hooks/pre-commit", "#!/bin/sh");
    write(&root, "src/lib.rs", "pub fn a() {}");
    write(&root, ".gitignore", "build/\n");

    let matcher =
        IgnoreMatcher::new(&RealFileSystem, BUILTIN_IGNORES, Some(&root.join(".gitignore"))).unwrap();

    let files = collect_files(&RealFileSystem, &[root.join("build/out.bin")], &matcher);
    assert!(files.is_empty(), "unexpected files: {files:?}");

    let files = collect_files(&RealFileSystem, &[root.join(".git/hooks")], &matcher);
    assert!(files.is_empty(), "unexpected files: {files:?}");

    let files = collect_files(&RealFileSystem, &[root.join("src")], &matcher);
    assert_eq!(relative(&root, &files), vec!["src/lib.rs"]);
}
