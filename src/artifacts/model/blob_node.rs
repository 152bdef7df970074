use crate::artifacts::diff::change_type::TreeChangeType;
use crate::artifacts::walk::walk_entry::Slot;
use std::path::{Path, PathBuf};

/// A changed file; the leaves of a change model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobNode {
    path: PathBuf,
    change: TreeChangeType,
}

impl BlobNode {
    pub fn new(path: PathBuf, change: TreeChangeType) -> Self {
        BlobNode { path, change }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn change(&self) -> &TreeChangeType {
        &self.change
    }

    /// The file as recorded in the commit, if it was recorded
    pub fn committed(&self) -> Option<&Slot> {
        self.change.old_slot()
    }

    /// The file as found in the working copy, if it is still there
    pub fn working(&self) -> Option<&Slot> {
        self.change.new_slot()
    }
}
