use crate::artifacts::model::change_node::{ChangeNode, NodeKind};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::path::Path;

const NAME_OID_LENGTH: usize = 6;

/// A commit, whose children are the working-copy changes against its tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    oid: ObjectId,
    commit: Commit,
}

impl CommitNode {
    pub fn new(oid: ObjectId, commit: Commit) -> Self {
        CommitNode { oid, commit }
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn tree_oid(&self) -> &ObjectId {
        self.commit.tree_oid()
    }

    /// Abbreviated id followed by the subject line
    pub fn name(&self) -> String {
        format!(
            "{} {}",
            self.oid.abbrev(NAME_OID_LENGTH),
            self.commit.short_message()
        )
    }

    pub(crate) fn child_kinds(&self, node: &ChangeNode<'_>) -> anyhow::Result<Vec<NodeKind>> {
        node.changed_entries(Some(self.commit.tree_oid()), Path::new(""))
    }
}
