//! Tests for DirectoryScanner

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use treegen::application::services::DirectoryScanner;
use treegen::application::ApplicationError;
use treegen::domain::Node;
use treegen::infrastructure::traits::RealFileSystem;
use treegen::util::testing::init_test_setup;

fn scanner() -> DirectoryScanner {
    init_test_setup();
    DirectoryScanner::new(Arc::new(RealFileSystem))
}

/// root/
///   l1/
///     l2/
///       l3.txt
///     l2.txt
///   top.txt
fn create_three_levels(root: &Path) {
    fs::create_dir_all(root.join("l1/l2")).unwrap();
    fs::write(root.join("l1/l2/l3.txt"), "").unwrap();
    fs::write(root.join("l1/l2.txt"), "").unwrap();
    fs::write(root.join("top.txt"), "").unwrap();
}

#[test]
fn given_three_levels_when_scanning_unlimited_then_returns_full_tree() {
    // Arrange
    let temp = TempDir::new().unwrap();
    create_three_levels(temp.path());

    // Act
    let tree = scanner().scan(temp.path(), 0, 0).unwrap();

    // Assert
    assert_eq!(
        tree,
        vec![
            Node::dir(
                "l1",
                vec![
                    Node::dir("l2", vec![Node::file("l3.txt")]),
                    Node::file("l2.txt")
                ]
            ),
            Node::file("top.txt"),
        ]
    );
}

#[test]
fn given_max_depth_one_when_scanning_then_only_first_level_as_leaves() {
    let temp = TempDir::new().unwrap();
    create_three_levels(temp.path());

    let tree = scanner().scan(temp.path(), 0, 1).unwrap();

    assert_eq!(tree, vec![Node::dir("l1", vec![]), Node::file("top.txt")]);
}

#[test]
fn given_max_depth_two_when_scanning_then_prunes_third_level() {
    let temp = TempDir::new().unwrap();
    create_three_levels(temp.path());

    let tree = scanner().scan(temp.path(), 0, 2).unwrap();

    assert_eq!(
        tree[0],
        Node::dir("l1", vec![Node::dir("l2", vec![]), Node::file("l2.txt")])
    );
}

#[test]
fn given_current_depth_at_limit_when_scanning_then_returns_empty() {
    let temp = TempDir::new().unwrap();
    create_three_levels(temp.path());

    let tree = scanner().scan(temp.path(), 2, 2).unwrap();

    assert!(tree.is_empty());
}

#[test]
fn given_ignored_entries_when_scanning_then_they_are_skipped() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git/objects")).unwrap();
    fs::write(temp.path().join(".git/HEAD"), "ref").unwrap();
    fs::write(temp.path().join(".DS_Store"), "").unwrap();
    fs::write(temp.path().join("a.txt"), "").unwrap();

    let tree = scanner().scan(temp.path(), 0, 0).unwrap();

    assert_eq!(tree, vec![Node::file("a.txt")]);
}

#[test]
fn given_nested_ignored_entries_when_scanning_then_they_are_skipped_everywhere() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("pkg/.git")).unwrap();
    fs::write(temp.path().join("pkg/.DS_Store"), "").unwrap();
    fs::write(temp.path().join("pkg/lib.rs"), "").unwrap();

    let tree = scanner().scan(temp.path(), 0, 0).unwrap();

    assert_eq!(tree, vec![Node::dir("pkg", vec![Node::file("lib.rs")])]);
}

#[test]
fn given_placeholder_names_on_disk_when_scanning_then_names_kept_verbatim() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("{name}")).unwrap();
    fs::write(temp.path().join("{name}/{env}.toml"), "").unwrap();

    let tree = scanner().scan(temp.path(), 0, 0).unwrap();

    assert_eq!(tree, vec![Node::dir("{name}", vec![Node::file("{env}.toml")])]);
}

#[test]
fn given_missing_directory_when_scanning_then_returns_io_error() {
    let temp = TempDir::new().unwrap();

    let result = scanner().scan(&temp.path().join("nope"), 0, 0);

    match result {
        Err(ApplicationError::OperationFailed { context, .. }) => {
            assert!(context.contains("nope"), "context should name path: {context}");
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}

#[test]
fn given_file_path_when_scanning_then_returns_io_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("f.txt");
    fs::write(&file, "").unwrap();

    assert!(scanner().scan(&file, 0, 0).is_err());
}

#[test]
fn given_empty_directory_when_scanning_then_returns_empty() {
    let temp = TempDir::new().unwrap();
    assert!(scanner().scan(temp.path(), 0, 0).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn given_unreadable_subdirectory_when_scanning_then_whole_scan_fails() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "").unwrap();
    let locked = temp.path().join("pkg/locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), "").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores permission bits
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = scanner().scan(temp.path(), 0, 0);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    match result {
        Err(ApplicationError::OperationFailed { context, .. }) => {
            assert!(context.contains("locked"), "context should name subdirectory: {context}");
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}
