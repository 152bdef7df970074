use crate::areas::projects::ProjectBinding;
use crate::areas::repository::Repository;
use crate::artifacts::diff::change_type::TreeChangeType;
use crate::artifacts::log::revision::Revision;
use crate::artifacts::model::blob_node::BlobNode;
use crate::artifacts::model::commit_node::CommitNode;
use crate::artifacts::model::repository_node::RepositoryNode;
use crate::artifacts::model::sync_data::SyncData;
use crate::artifacts::model::tree_node::TreeNode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::changed_paths;
use crate::artifacts::walk::tree_filter::TreeFilter;
use crate::artifacts::walk::tree_source::WorkingTreeIterator;
use crate::artifacts::walk::tree_walk::TreeWalk;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_DESTINATION: &str = "HEAD";

/// What a node hangs off: the repository itself for a root, its parent otherwise
#[derive(Debug, Clone)]
pub enum Owner<'p> {
    Repository(Arc<Repository>),
    Node(&'p ChangeNode<'p>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Repository(RepositoryNode),
    Commit(CommitNode),
    Tree(TreeNode),
    Blob(BlobNode),
}

/// A node of the change model
///
/// Children borrow their parent, so a model is built top-down from a root made
/// with [`ChangeNode::create_root`] and cannot outlive it. Children are computed
/// from the repository and the working copy on every call to
/// [`ChangeNode::children`]; nothing is cached.
#[derive(Debug, Clone)]
pub struct ChangeNode<'p> {
    owner: Owner<'p>,
    kind: NodeKind,
}

impl ChangeNode<'static> {
    /// Build the root of a change model
    ///
    /// Resolves both endpoints and checks that the destination commit and its
    /// tree can be read. An unborn `HEAD` gives a root without children.
    pub fn create_root(data: SyncData) -> anyhow::Result<Self> {
        let repository = data.repository().clone();
        if !repository.git_path().is_dir() {
            anyhow::bail!(
                "not a repository (or any of the parent directories): {}",
                repository.path().display()
            );
        }

        let destination = Revision::try_parse(data.destination().unwrap_or(DEFAULT_DESTINATION))?
            .resolve(&repository)?;
        let source = match data.source() {
            Some(source) => Revision::try_parse(source)?.resolve(&repository)?,
            None => None,
        };

        if let Some(destination) = &destination {
            let commit = repository
                .database()
                .parse_object_as_commit(destination)
                .with_context(|| format!("Unable to read commit {destination}"))?;
            repository
                .database()
                .parse_object_as_tree(commit.tree_oid())
                .with_context(|| format!("Unable to read the tree of commit {destination}"))?;
        }

        tracing::debug!(
            repository = %repository.path().display(),
            destination = ?destination,
            source = ?source,
            "created change model root"
        );

        Ok(ChangeNode {
            owner: Owner::Repository(repository),
            kind: NodeKind::Repository(RepositoryNode::new(destination, source)),
        })
    }
}

impl<'p> ChangeNode<'p> {
    fn child(&self, kind: NodeKind) -> ChangeNode<'_> {
        ChangeNode {
            owner: Owner::Node(self),
            kind,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<&ChangeNode<'p>> {
        match &self.owner {
            Owner::Repository(_) => None,
            Owner::Node(parent) => Some(*parent),
        }
    }

    /// The root this node descends from (the node itself for a root)
    pub fn root(&self) -> &ChangeNode<'_> {
        let mut node: &ChangeNode<'_> = self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// The repository of the model, as held by the root
    pub fn repository(&self) -> &Repository {
        match &self.owner {
            Owner::Repository(repository) => repository.as_ref(),
            Owner::Node(parent) => parent.repository(),
        }
    }

    /// Fresh list of this node's children
    pub fn children(&self) -> anyhow::Result<Vec<ChangeNode<'_>>> {
        let kinds = match &self.kind {
            NodeKind::Repository(root) => root.child_kinds(self)?,
            NodeKind::Commit(commit) => commit.child_kinds(self)?,
            NodeKind::Tree(tree) => tree.child_kinds(self)?,
            NodeKind::Blob(_) => Vec::new(),
        };

        tracing::debug!(node = %self.name(), children = kinds.len(), "materialized children");
        Ok(kinds.into_iter().map(|kind| self.child(kind)).collect())
    }

    pub fn name(&self) -> String {
        match &self.kind {
            NodeKind::Repository(root) => root.name(self.repository()),
            NodeKind::Commit(commit) => commit.name(),
            NodeKind::Tree(_) | NodeKind::Blob(_) => display_name(self.path()),
        }
    }

    /// Repository-relative path, empty for roots and commits
    pub fn path(&self) -> &Path {
        match &self.kind {
            NodeKind::Repository(_) | NodeKind::Commit(_) => Path::new(""),
            NodeKind::Tree(tree) => tree.path(),
            NodeKind::Blob(blob) => blob.path(),
        }
    }

    /// Where the node lives in the working copy
    pub fn location(&self) -> PathBuf {
        self.repository().workspace().absolute(self.path())
    }

    /// Projects the node touches
    pub fn projects(&self) -> anyhow::Result<BTreeSet<ProjectBinding>> {
        let projects = self.repository().projects()?;
        let path = self.path();

        Ok(match &self.kind {
            NodeKind::Repository(_) | NodeKind::Commit(_) => projects,
            NodeKind::Tree(_) => projects
                .into_iter()
                .filter(|project| project.overlaps(path))
                .collect(),
            NodeKind::Blob(_) => projects
                .into_iter()
                .filter(|project| project.contains(path))
                .collect(),
        })
    }

    /// A walk over this node's repository reporting one level of differences
    pub fn create_tree_walk(&self) -> TreeWalk<'_> {
        TreeWalk::for_differences(self.repository())
    }

    /// Changed, non-ignored files between the tree `base` and the working-copy
    /// directory this node stands for
    pub fn not_ignored_paths(&self, base: &ObjectId) -> anyhow::Result<Vec<PathBuf>> {
        changed_paths::not_ignored_paths(self.repository(), base, self.base_dir())
    }

    /// Working-copy directory the node's tree walks are scoped to
    fn base_dir(&self) -> &Path {
        match &self.kind {
            NodeKind::Repository(_) | NodeKind::Commit(_) => Path::new(""),
            NodeKind::Tree(tree) => tree.path(),
            NodeKind::Blob(blob) => blob.path().parent().unwrap_or(Path::new("")),
        }
    }

    /// One node per changed entry directly below `base_path`, comparing the
    /// recorded tree `tree` (empty when absent) with the working copy
    pub(crate) fn changed_entries(
        &self,
        tree: Option<&ObjectId>,
        base_path: &Path,
    ) -> anyhow::Result<Vec<NodeKind>> {
        let mut walk = self.create_tree_walk();
        walk.set_base_path(base_path);
        let committed = match tree {
            Some(oid) => walk.add_tree(oid)?,
            None => walk.add_empty_tree(),
        };
        let working = walk.add_working_tree(WorkingTreeIterator::new(self.repository())?);
        let filter = walk.tree_filter().clone().and(TreeFilter::NotIgnored(working));
        walk.set_filter(filter);

        let mut kinds = Vec::new();
        for entry in walk {
            let entry = entry?;
            let recorded = entry.slot(committed).cloned();

            if entry.is_tree() {
                let tree_oid = recorded.and_then(|slot| slot.oid);
                kinds.push(NodeKind::Tree(TreeNode::new(entry.path().to_path_buf(), tree_oid)));
            } else if let Some(change) =
                TreeChangeType::from_slots(recorded, entry.slot(working).cloned())
            {
                kinds.push(NodeKind::Blob(BlobNode::new(entry.path().to_path_buf(), change)));
            }
        }

        Ok(kinds)
    }
}

/// Last component of `path`, for display only
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
