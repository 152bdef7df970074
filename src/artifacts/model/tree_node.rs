use crate::artifacts::model::change_node::{ChangeNode, NodeKind};
use crate::artifacts::objects::object_id::ObjectId;
use std::path::{Path, PathBuf};

/// A directory holding changes
///
/// `tree_oid` is the recorded subtree, absent when the directory only exists in
/// the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    path: PathBuf,
    tree_oid: Option<ObjectId>,
}

impl TreeNode {
    pub fn new(path: PathBuf, tree_oid: Option<ObjectId>) -> Self {
        TreeNode { path, tree_oid }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree_oid(&self) -> Option<&ObjectId> {
        self.tree_oid.as_ref()
    }

    pub(crate) fn child_kinds(&self, node: &ChangeNode<'_>) -> anyhow::Result<Vec<NodeKind>> {
        node.changed_entries(self.tree_oid.as_ref(), &self.path)
    }
}
