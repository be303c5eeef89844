// tests/watch_core_mock.rs

use std::path::{Path, PathBuf};

use fwatch::engine::WatchCore;
use fwatch::fs::mock::MockFileSystem;
use fwatch::watch::{IgnoreMatcher, BUILTIN_IGNORES};
use fwatch_test_utils::init_tracing;

fn project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file_at("/proj/src/main.rs", "fn main() {}", 100);
    fs.add_file_at("/proj/src/lib.rs", "pub fn lib() {}", 100);
    fs.add_file_at("/proj/README.md", "# readme", 100);
    fs.add_file_at("/proj/.git/HEAD", "ref: refs/heads/main", 100);
    fs
}

fn core() -> WatchCore {
    WatchCore::new(
        vec![PathBuf::from("/proj")],
        IgnoreMatcher::builtin().unwrap(),
    )
}

fn names(changed: &[PathBuf]) -> Vec<&str> {
    changed.iter().filter_map(|p| p.to_str()).collect()
}

#[test]
fn first_poll_reports_every_file_once() {
    init_tracing();
    let fs = project();
    let mut core = core();

    let report = core.poll(&fs);

    assert_eq!(report.scanned, 3);
    assert_eq!(
        names(&report.changed),
        vec!["/proj/README.md", "/proj/src/lib.rs", "/proj/src/main.rs"]
    );
}

#[test]
fn second_poll_without_mutation_reports_nothing() {
    let fs = project();
    let mut core = core();

    core.poll(&fs);
    let report = core.poll(&fs);

    assert_eq!(report.scanned, 3);
    assert!(!report.has_changes());
}

#[test]
fn only_strictly_increasing_mtimes_are_changes() {
    let fs = project();
    let mut core = core();
    core.poll(&fs);

    fs.touch("/proj/src/main.rs", 101);
    fs.touch("/proj/src/lib.rs", 50);
    let report = core.poll(&fs);
    assert_eq!(names(&report.changed), vec!["/proj/src/main.rs"]);

    // Going backwards does not lower the stored value either.
    fs.touch("/proj/src/lib.rs", 100);
    assert!(!core.poll(&fs).has_changes());
    assert!(
        core.table().last_seen(Path::new("/proj/src/lib.rs"))
            == Some(std::time::UNIX_EPOCH + std::time::Duration::from_secs(100))
    );
}

#[test]
fn new_files_count_as_changed_regardless_of_age() {
    let fs = project();
    let mut core = core();
    core.poll(&fs);

    fs.add_file_at("/proj/src/old.rs", "// restored from backup", 1);
    let report = core.poll(&fs);

    assert_eq!(names(&report.changed), vec!["/proj/src/old.rs"]);
}

#[test]
fn deleted_files_produce_no_event_and_keep_their_entry() {
    let fs = project();
    let mut core = core();
    core.poll(&fs);

    fs.remove("/proj/README.md");
    let report = core.poll(&fs);
    assert_eq!(report.scanned, 2);
    assert!(!report.has_changes());
    assert_eq!(core.table().len(), 3);

    // Same path reappears with the old timestamp: not a change.
    fs.add_file_at("/proj/README.md", "# readme", 100);
    assert!(!core.poll(&fs).has_changes());

    fs.touch("/proj/README.md", 200);
    assert_eq!(names(&core.poll(&fs).changed), vec!["/proj/README.md"]);
}

#[test]
fn files_in_ignored_directories_never_show_up() {
    let fs = project();
    let mut core = core();

    for secs in [100, 200, 300] {
        fs.touch("/proj/.git/HEAD", secs);
        let report = core.poll(&fs);
        assert!(report.changed.iter().all(|p| !p.starts_with("/proj/.git")));
    }
    assert!(core.table().last_seen(Path::new("/proj/.git/HEAD")).is_none());
}

#[test]
fn watch_roots_are_resolved_every_cycle() {
    let fs = MockFileSystem::new();
    let mut core = WatchCore::new(
        vec![PathBuf::from("/later")],
        IgnoreMatcher::from_lines(BUILTIN_IGNORES, None, std::iter::empty::<&str>()).unwrap(),
    );

    assert_eq!(core.poll(&fs).scanned, 0);

    fs.add_file_at("/later/file.txt", "hi", 5);
    assert_eq!(names(&core.poll(&fs).changed), vec!["/later/file.txt"]);
}
