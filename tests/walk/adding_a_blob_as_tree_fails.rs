use crate::common::repository::{TestRepository, test_repository};
use bitsync::artifacts::database::store_error::StoreError;
use bitsync::artifacts::objects::blob::Blob;
use bitsync::artifacts::walk::tree_walk::TreeWalk;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_blob_as_tree_fails(test_repository: TestRepository) {
    let blob_id = test_repository
        .repository
        .database()
        .store(&Blob::new("not a tree".into()))
        .unwrap();

    let mut walk = TreeWalk::for_differences(&test_repository.repository);
    let error = walk.add_tree(&blob_id).unwrap_err();

    assert_eq!(walk.tree_count(), 0);
    let store_error = StoreError::find(&error).expect("a store error");
    assert!(matches!(store_error, StoreError::UnexpectedObjectType { .. }));
    assert!(store_error.is_missing_object());
}
