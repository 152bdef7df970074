use crate::common::repository::{TestRepository, find_child, test_repository};
use bitsync::artifacts::model::change_node::NodeKind;
use rstest::rstest;

#[rstest]
fn every_node_resolves_the_root_repository(test_repository: TestRepository) {
    test_repository.write("src/lib.rs", "pub fn one() {}\n");
    test_repository.commit("Add library");
    test_repository.write("src/lib.rs", "pub fn two() {}\n");

    let root = test_repository.root();
    assert!(root.parent().is_none());
    assert!(std::ptr::eq(root.repository(), &*test_repository.repository));

    let commits = root.children().unwrap();
    assert_eq!(commits.len(), 1);
    let commit = &commits[0];

    let trees = commit.children().unwrap();
    let src = find_child(&trees, "src");
    assert!(matches!(src.kind(), NodeKind::Tree(_)));

    let blobs = src.children().unwrap();
    let lib = find_child(&blobs, "lib.rs");
    assert!(matches!(lib.kind(), NodeKind::Blob(_)));

    for node in [commit, src, lib] {
        assert!(std::ptr::eq(node.repository(), root.repository()));
        assert!(std::ptr::eq(node.root(), &root));
    }

    assert!(std::ptr::eq(commit.parent().unwrap(), &root));
    assert!(std::ptr::eq(src.parent().unwrap(), commit));
    assert!(std::ptr::eq(lib.parent().unwrap(), src));
}
