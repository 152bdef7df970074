use crate::common::repository::{TestRepository, find_child, test_repository};
use bitsync::areas::config::SyncConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::PathBuf;

#[rstest]
fn ignored_build_output_is_left_out(test_repository: TestRepository) {
    test_repository
        .write("a.txt", "first")
        .write("build/out.bin", "binary v1");
    let commit_id = test_repository.commit("Initial commit");
    test_repository
        .write(".git/info/exclude", "build/out.bin\n")
        .write("a.txt", "second")
        .write("build/out.bin", "binary v2");

    let root = test_repository.root();
    let base = test_repository.tree_of(&commit_id);

    let paths = root.not_ignored_paths(&base).unwrap();

    assert_eq!(paths, vec![PathBuf::from("a.txt")]);
}

#[rstest]
fn new_ignore_file_is_itself_a_change(test_repository: TestRepository) {
    test_repository.write("a.txt", "first");
    let commit_id = test_repository.commit("Initial commit");
    test_repository
        .write(".gitignore", "target/\n")
        .write("target/debug/app", "binary");

    let root = test_repository.root();
    let paths = root
        .not_ignored_paths(&test_repository.tree_of(&commit_id))
        .unwrap();

    assert_eq!(paths, vec![PathBuf::from(".gitignore")]);
}

#[rstest]
fn only_the_tracked_change_is_listed(test_repository: TestRepository) {
    test_repository
        .write(".gitignore", "*.log\n")
        .write("notes.txt", "draft");
    let commit_id = test_repository.commit("Notes");
    test_repository
        .write("notes.txt", "final")
        .write("debug.log", "noise");

    let root = test_repository.root();
    let paths = root
        .not_ignored_paths(&test_repository.tree_of(&commit_id))
        .unwrap();

    assert_eq!(paths, vec![PathBuf::from("notes.txt")]);
}

#[rstest]
fn deleted_and_added_files_are_listed_recursively(test_repository: TestRepository) {
    test_repository
        .write("keep.txt", "keep")
        .write("old/gone.txt", "gone")
        .write("src/main.rs", "fn main() {}");
    let commit_id = test_repository.commit("Initial commit");
    test_repository
        .delete("old")
        .write("src/util/mod.rs", "pub mod util;");

    let root = test_repository.root();
    let paths = root
        .not_ignored_paths(&test_repository.tree_of(&commit_id))
        .unwrap();

    assert_eq!(
        paths,
        vec![PathBuf::from("old/gone.txt"), PathBuf::from("src/util/mod.rs")]
    );
}

#[rstest]
fn tree_nodes_scope_the_listing_to_their_directory(test_repository: TestRepository) {
    test_repository
        .write("top.txt", "top")
        .write("lib/a.rs", "a")
        .write("lib/nested/b.rs", "b");
    test_repository.commit("Initial commit");
    test_repository
        .write("top.txt", "changed")
        .write("lib/nested/b.rs", "changed");

    let root = test_repository.root();
    let commits = root.children().unwrap();
    let entries = commits[0].children().unwrap();
    let lib = find_child(&entries, "lib");
    let bitsync::artifacts::model::change_node::NodeKind::Tree(lib_tree) = lib.kind() else {
        panic!("expected a tree node");
    };

    let paths = lib
        .not_ignored_paths(lib_tree.tree_oid().unwrap())
        .unwrap();

    assert_eq!(paths, vec![PathBuf::from("lib/nested/b.rs")]);
}

#[test]
fn configured_excludes_apply_without_ignore_files() {
    let test_repository = TestRepository::with_config(SyncConfig {
        exclude_patterns: vec!["*.tmp".to_string()],
        ..SyncConfig::default()
    });
    test_repository.write("data.csv", "1,2");
    let commit_id = test_repository.commit("Data");
    test_repository
        .write("data.csv", "1,2,3")
        .write("scratch.tmp", "temporary");

    let root = test_repository.root();
    let paths = root
        .not_ignored_paths(&test_repository.tree_of(&commit_id))
        .unwrap();

    assert_eq!(paths, vec![PathBuf::from("data.csv")]);
}
