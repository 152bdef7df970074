use crate::common::repository::{TestRepository, test_repository};
use bitsync::artifacts::walk::tree_walk::TreeWalk;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_drops_added_trees(test_repository: TestRepository) {
    test_repository.write("a.txt", "a");
    let commit = test_repository.commit("Initial commit");
    let tree = test_repository.tree_of(&commit);

    let mut walk = TreeWalk::for_differences(&test_repository.repository);
    walk.add_empty_tree();
    walk.add_tree(&tree).unwrap();
    assert_eq!(walk.advance().unwrap().unwrap().name(), "a.txt");

    walk.reset();
    assert_eq!(walk.tree_count(), 0);
    assert!(walk.advance().unwrap().is_none());

    // indices restart from zero
    assert_eq!(walk.add_tree(&tree).unwrap(), 0);
    assert_eq!(walk.add_empty_tree(), 1);
    assert_eq!(walk.advance().unwrap().unwrap().name(), "a.txt");
}
