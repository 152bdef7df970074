use crate::common::repository::{TestRepository, test_repository};
use bitsync::artifacts::database::store_error::StoreError;
use bitsync::artifacts::model::change_node::ChangeNode;
use bitsync::artifacts::model::sync_data::SyncData;
use bitsync::artifacts::objects::blob::Blob;
use bitsync::artifacts::objects::object::Object;
use rstest::rstest;

#[rstest]
fn missing_commit_tree_fails_root_construction(test_repository: TestRepository) {
    test_repository.write("a.txt", "a");
    let commit_id = test_repository.commit("Initial commit");
    let tree_id = test_repository.tree_of(&commit_id);
    let tree_path = test_repository
        .repository
        .database()
        .objects_path()
        .join(tree_id.to_path());
    std::fs::remove_file(tree_path).unwrap();

    let error = ChangeNode::create_root(SyncData::new(test_repository.repository.clone()))
        .unwrap_err();

    let store_error = StoreError::find(&error).expect("a store error");
    assert!(matches!(store_error, StoreError::MissingObject { oid } if *oid == tree_id));
}

#[rstest]
fn missing_subtree_fails_children_materialization(test_repository: TestRepository) {
    test_repository.write("dir/a.txt", "a");
    let commit_id = test_repository.commit("Initial commit");
    test_repository.write("dir/a.txt", "edited");

    let root = test_repository.root();
    let commits = root.children().unwrap();
    let entries = commits[0].children().unwrap();
    assert_eq!(entries.len(), 1);

    let root_tree = test_repository
        .repository
        .database()
        .parse_object_as_tree(&test_repository.tree_of(&commit_id))
        .unwrap();
    let subtree_id = root_tree.get("dir").unwrap().oid.clone();
    let subtree_path = test_repository
        .repository
        .database()
        .objects_path()
        .join(subtree_id.to_path());
    std::fs::remove_file(subtree_path).unwrap();

    let error = entries[0].children().unwrap_err();

    assert!(StoreError::find(&error).is_some_and(StoreError::is_missing_object));
}

#[rstest]
fn listing_against_a_blob_id_is_a_missing_object_error(test_repository: TestRepository) {
    let blob = Blob::new("just a file".into());
    let blob_id = test_repository.repository.database().store(&blob).unwrap();
    assert_eq!(blob.object_id().unwrap(), blob_id);

    let root = test_repository.root();
    let error = root.not_ignored_paths(&blob_id).unwrap_err();

    let store_error = StoreError::find(&error).expect("a store error");
    assert!(matches!(store_error, StoreError::UnexpectedObjectType { .. }));
    assert!(store_error.is_missing_object());
}

#[rstest]
fn unknown_tree_id_is_a_missing_object_error(test_repository: TestRepository) {
    let unknown = bitsync::artifacts::objects::object_id::ObjectId::try_parse(
        "0123456789abcdef0123456789abcdef01234567".to_string(),
    )
    .unwrap();

    let root = test_repository.root();
    let error = root.not_ignored_paths(&unknown).unwrap_err();

    assert!(matches!(
        StoreError::find(&error),
        Some(StoreError::MissingObject { .. })
    ));
}

#[rstest]
fn blob_id_as_destination_is_rejected(test_repository: TestRepository) {
    let blob_id = test_repository
        .repository
        .database()
        .store(&Blob::new("content".into()))
        .unwrap();

    let data = SyncData::new(test_repository.repository.clone()).with_destination(blob_id.as_ref());

    assert!(ChangeNode::create_root(data).is_err());
}
