#![cfg(unix)]

use crate::common::repository::{TestRepository, find_child, test_repository};
use bitsync::artifacts::diff::change_type::TreeChangeType;
use bitsync::artifacts::model::change_node::NodeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

fn latin1_name() -> &'static OsStr {
    OsStr::from_bytes(b"caf\xe9.txt")
}

#[rstest]
fn untracked_latin1_file_is_listed_next_to_a_modified_file(test_repository: TestRepository) {
    test_repository.write("a.txt", "first");
    let commit_id = test_repository.commit("Initial commit");
    test_repository.write("a.txt", "second");
    std::fs::write(test_repository.path().join(latin1_name()), "bonjour").unwrap();

    let root = test_repository.root();
    let commits = root.children().unwrap();
    let entries = commits[0].children().unwrap();

    assert_eq!(entries.len(), 2);
    let added = entries
        .iter()
        .find(|entry| entry.path().as_os_str() == latin1_name())
        .expect("the latin1 file is a child of the commit");
    let NodeKind::Blob(blob) = added.kind() else {
        panic!("expected a blob node");
    };
    assert!(matches!(blob.change(), TreeChangeType::Added(_)));
    assert_eq!(added.location(), test_repository.path().join(latin1_name()));
    assert!(matches!(find_child(&entries, "a.txt").kind(), NodeKind::Blob(_)));

    let paths = root
        .not_ignored_paths(&test_repository.tree_of(&commit_id))
        .unwrap();
    assert_eq!(paths, vec![PathBuf::from("a.txt"), PathBuf::from(latin1_name())]);
}

#[rstest]
fn names_differing_only_in_invalid_bytes_stay_distinct(test_repository: TestRepository) {
    test_repository.write("a.txt", "first");
    std::fs::write(test_repository.path().join(latin1_name()), "one").unwrap();
    std::fs::write(
        test_repository.path().join(OsStr::from_bytes(b"caf\xe8.txt")),
        "two",
    )
    .unwrap();
    test_repository.commit("Initial commit");
    std::fs::write(test_repository.path().join(latin1_name()), "one, edited").unwrap();

    let root = test_repository.root();
    let commits = root.children().unwrap();
    let entries = commits[0].children().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path().as_os_str(), latin1_name());
    let NodeKind::Blob(blob) = entries[0].kind() else {
        panic!("expected a blob node");
    };
    assert!(matches!(blob.change(), TreeChangeType::Modified { .. }));
}
