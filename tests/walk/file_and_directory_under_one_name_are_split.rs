use crate::common::repository::{TestRepository, test_repository};
use bitsync::artifacts::walk::tree_source::WorkingTreeIterator;
use bitsync::artifacts::walk::tree_walk::TreeWalk;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn file_and_directory_under_one_name_are_split(test_repository: TestRepository) {
    test_repository.write("x", "a file");
    let commit = test_repository.commit("Initial commit");
    test_repository.delete("x").write("x/y.txt", "now a directory");

    let mut walk = TreeWalk::for_differences(&test_repository.repository);
    let committed = walk.add_tree(&test_repository.tree_of(&commit)).unwrap();
    let working =
        walk.add_working_tree(WorkingTreeIterator::new(&test_repository.repository).unwrap());

    let entries = walk.collect::<anyhow::Result<Vec<_>>>().unwrap();

    assert_eq!(entries.len(), 2);
    assert!(!entries[0].is_tree());
    assert!(entries[0].slot(committed).is_some());
    assert!(entries[0].slot(working).is_none());
    assert!(entries[1].is_tree());
    assert!(entries[1].slot(committed).is_none());
    assert!(entries[1].slot(working).is_some());
    assert_eq!(entries[0].path(), entries[1].path());
}
