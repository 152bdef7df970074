use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// State of one name in one of the walked trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub mode: EntryMode,
    /// Unknown for working-copy directories and for ignored working-copy files
    pub oid: Option<ObjectId>,
}

impl Slot {
    pub fn new(mode: EntryMode, oid: Option<ObjectId>) -> Self {
        Slot { mode, oid }
    }

    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }
}

/// A name visited by a [`TreeWalk`](super::tree_walk::TreeWalk), with its state in
/// every tree added to the walk (in the order the trees were added).
///
/// An entry is either a leaf or a directory in all the trees it appears in: a
/// name that is a file on one side and a directory on the other is visited twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    name: OsString,
    path: PathBuf,
    slots: Vec<Option<Slot>>,
}

impl WalkEntry {
    pub fn new(name: OsString, path: PathBuf, slots: Vec<Option<Slot>>) -> Self {
        WalkEntry { name, path, slots }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Repository-relative path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn slot(&self, tree_index: usize) -> Option<&Slot> {
        self.slots.get(tree_index).and_then(Option::as_ref)
    }

    pub fn slots(&self) -> &[Option<Slot>] {
        &self.slots
    }

    pub fn tree_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_tree(&self) -> bool {
        self.slots.iter().flatten().any(Slot::is_tree)
    }

    /// Split an entry whose slots mix leaves and directories into a leaf-only
    /// entry and a directory-only entry
    pub(crate) fn split(self) -> Vec<WalkEntry> {
        let has_tree = self.slots.iter().flatten().any(Slot::is_tree);
        let has_leaf = self.slots.iter().flatten().any(|slot| !slot.is_tree());
        if !(has_tree && has_leaf) {
            return vec![self];
        }

        let keep = |is_tree: bool| {
            self.slots
                .iter()
                .map(|slot| slot.clone().filter(|slot| slot.is_tree() == is_tree))
                .collect::<Vec<_>>()
        };
        let leaf = WalkEntry::new(self.name.clone(), self.path.clone(), keep(false));
        let tree = WalkEntry::new(self.name.clone(), self.path.clone(), keep(true));

        vec![leaf, tree]
    }
}
