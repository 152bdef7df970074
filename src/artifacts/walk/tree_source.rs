//! The trees a walk can visit side by side

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::ignore_rules::IgnoreRules;
use std::path::Path;

/// The live working copy as one side of a walk
///
/// Ignore rules are captured when the iterator is created, so each walk sees the
/// rules as they are on disk at that moment.
#[derive(Debug, Clone)]
pub struct WorkingTreeIterator {
    rules: IgnoreRules,
}

impl WorkingTreeIterator {
    pub fn new(repository: &Repository) -> anyhow::Result<Self> {
        Ok(WorkingTreeIterator {
            rules: repository.ignore_rules()?,
        })
    }

    pub fn with_rules(rules: IgnoreRules) -> Self {
        WorkingTreeIterator { rules }
    }

    pub fn rules(&self) -> &IgnoreRules {
        &self.rules
    }

    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.rules.is_ignored(path, is_dir)
    }
}

#[derive(Debug, Clone)]
pub enum TreeSource {
    Empty,
    Committed(ObjectId),
    WorkingTree(WorkingTreeIterator),
}

impl TreeSource {
    pub fn working_tree(&self) -> Option<&WorkingTreeIterator> {
        match self {
            TreeSource::WorkingTree(iterator) => Some(iterator),
            _ => None,
        }
    }
}
