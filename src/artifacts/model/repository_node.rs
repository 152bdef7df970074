use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::model::change_node::{ChangeNode, NodeKind};
use crate::artifacts::model::commit_node::CommitNode;
use crate::artifacts::objects::object_id::ObjectId;

/// Root of a change model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryNode {
    destination: Option<ObjectId>,
    source: Option<ObjectId>,
}

impl RepositoryNode {
    pub fn new(destination: Option<ObjectId>, source: Option<ObjectId>) -> Self {
        RepositoryNode {
            destination,
            source,
        }
    }

    pub fn destination(&self) -> Option<&ObjectId> {
        self.destination.as_ref()
    }

    pub fn source(&self) -> Option<&ObjectId> {
        self.source.as_ref()
    }

    pub fn name(&self, repository: &Repository) -> String {
        repository.path().display().to_string()
    }

    /// One commit node per commit of `source..destination`, newest first
    pub(crate) fn child_kinds(&self, node: &ChangeNode<'_>) -> anyhow::Result<Vec<NodeKind>> {
        let rev_list = RevList::new(
            node.repository(),
            self.destination.clone(),
            self.source.clone(),
        );

        Ok(rev_list
            .commits()?
            .into_iter()
            .map(|(oid, commit)| NodeKind::Commit(CommitNode::new(oid, commit)))
            .collect())
    }
}
