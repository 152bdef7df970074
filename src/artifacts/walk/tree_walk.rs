//! Synchronized traversal of several trees
//!
//! Trees are added to a [`TreeWalk`] and then visited together, one directory
//! level at a time. At each level the entries of every tree are merged by name
//! (byte order), so a single [`WalkEntry`] shows what a name looks like in each
//! tree. The configured [`TreeFilter`] decides which entries are reported.

use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::tree_filter::TreeFilter;
use crate::artifacts::walk::tree_source::{TreeSource, WorkingTreeIterator};
use crate::artifacts::walk::walk_entry::{Slot, WalkEntry};
use std::collections::{BTreeMap, VecDeque};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Where the entries of one tree come from at the level being read
#[derive(Debug, Clone)]
enum Cursor {
    Absent,
    Committed(ObjectId),
    WorkingDir(PathBuf),
}

pub struct TreeWalk<'r> {
    repository: &'r Repository,
    sources: Vec<TreeSource>,
    filter: TreeFilter,
    recursive: bool,
    base_path: PathBuf,
    /// Pending entries per directory level, `None` until the first advance
    pending: Option<Vec<VecDeque<WalkEntry>>>,
}

impl<'r> TreeWalk<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        TreeWalk {
            repository,
            sources: Vec::new(),
            filter: TreeFilter::All,
            recursive: false,
            base_path: PathBuf::new(),
            pending: None,
        }
    }

    /// A walk over one directory level, reporting only entries that differ
    /// between the trees later added to it
    pub fn for_differences(repository: &'r Repository) -> Self {
        let mut walk = TreeWalk::new(repository);
        walk.reset();
        walk.set_recursive(false);
        walk.set_filter(TreeFilter::AnyDiff);
        walk
    }

    /// Drop every added tree and any traversal progress
    pub fn reset(&mut self) {
        self.sources.clear();
        self.pending = None;
    }

    pub fn set_recursive(&mut self, recursive: bool) {
        self.recursive = recursive;
    }

    pub fn set_filter(&mut self, filter: TreeFilter) {
        self.filter = filter;
    }

    pub fn tree_filter(&self) -> &TreeFilter {
        &self.filter
    }

    /// Directory the added trees correspond to, relative to the repository root
    ///
    /// Reported paths are prefixed with it and working trees are read from it.
    pub fn set_base_path(&mut self, base_path: impl AsRef<Path>) {
        self.base_path = base_path
            .as_ref()
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect();
    }

    pub fn tree_count(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[TreeSource] {
        &self.sources
    }

    /// Add a recorded tree to the walk
    ///
    /// # Arguments
    ///
    /// * `oid` - Id of a tree object in the repository database
    ///
    /// # Returns
    ///
    /// The index of the tree among the walked trees, or an error if `oid` does not
    /// name a readable tree object
    pub fn add_tree(&mut self, oid: &ObjectId) -> anyhow::Result<usize> {
        self.repository.database().parse_object_as_tree(oid)?;
        Ok(self.push_source(TreeSource::Committed(oid.clone())))
    }

    pub fn add_empty_tree(&mut self) -> usize {
        self.push_source(TreeSource::Empty)
    }

    pub fn add_working_tree(&mut self, iterator: WorkingTreeIterator) -> usize {
        self.push_source(TreeSource::WorkingTree(iterator))
    }

    fn push_source(&mut self, source: TreeSource) -> usize {
        self.pending = None;
        self.sources.push(source);
        self.sources.len() - 1
    }

    /// Move to the next entry accepted by the filter
    pub fn advance(&mut self) -> anyhow::Result<Option<WalkEntry>> {
        if self.pending.is_none() {
            let top_level = self.top_level_cursors();
            let entries = self.read_level(&top_level, &self.base_path)?;
            self.pending = Some(vec![entries.into()]);
        }

        loop {
            let Some(levels) = self.pending.as_mut() else {
                return Ok(None);
            };
            let Some(level) = levels.last_mut() else {
                return Ok(None);
            };
            let Some(entry) = level.pop_front() else {
                levels.pop();
                continue;
            };

            if !self.filter.include(&entry, &self.sources) {
                continue;
            }

            if !entry.is_tree() {
                tracing::trace!(path = %entry.path().display(), "walk entry");
                return Ok(Some(entry));
            }

            if self.recursive {
                let children = self.read_children(&entry)?;
                if let Some(levels) = self.pending.as_mut() {
                    levels.push(children.into());
                }
                continue;
            }

            if self.filter.is_diff_sensitive() && !self.subtree_has_match(&entry)? {
                tracing::trace!(
                    path = %entry.path().display(),
                    "no reportable change below directory"
                );
                continue;
            }

            tracing::trace!(path = %entry.path().display(), "walk entry");
            return Ok(Some(entry));
        }
    }

    /// Whether anything below the directory `entry` passes the filter
    fn subtree_has_match(&self, entry: &WalkEntry) -> anyhow::Result<bool> {
        for child in self.read_children(entry)? {
            if !self.filter.include(&child, &self.sources) {
                continue;
            }
            if !child.is_tree() || self.subtree_has_match(&child)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn top_level_cursors(&self) -> Vec<Cursor> {
        self.sources
            .iter()
            .map(|source| match source {
                TreeSource::Empty => Cursor::Absent,
                TreeSource::Committed(oid) => Cursor::Committed(oid.clone()),
                TreeSource::WorkingTree(_) => Cursor::WorkingDir(self.base_path.clone()),
            })
            .collect()
    }

    fn read_children(&self, entry: &WalkEntry) -> anyhow::Result<Vec<WalkEntry>> {
        let cursors = self
            .sources
            .iter()
            .zip(entry.slots())
            .map(|(source, slot)| match (source, slot) {
                (TreeSource::WorkingTree(_), Some(slot)) if slot.is_tree() => {
                    Cursor::WorkingDir(entry.path().to_path_buf())
                }
                (_, Some(Slot { oid: Some(oid), mode })) if mode.is_tree() => {
                    Cursor::Committed(oid.clone())
                }
                _ => Cursor::Absent,
            })
            .collect::<Vec<_>>();

        self.read_level(&cursors, entry.path())
    }

    /// Merge one directory level of every tree by entry name
    fn read_level(&self, cursors: &[Cursor], dir_path: &Path) -> anyhow::Result<Vec<WalkEntry>> {
        let tree_count = cursors.len();
        let mut merged: BTreeMap<OsString, Vec<Option<Slot>>> = BTreeMap::new();

        for (index, cursor) in cursors.iter().enumerate() {
            for (name, slot) in self.read_cursor(index, cursor, dir_path)? {
                merged.entry(name).or_insert_with(|| vec![None; tree_count])[index] = Some(slot);
            }
        }

        Ok(merged
            .into_iter()
            .flat_map(|(name, slots)| {
                let path = dir_path.join(&name);
                WalkEntry::new(name, path, slots).split()
            })
            .collect())
    }

    fn read_cursor(
        &self,
        index: usize,
        cursor: &Cursor,
        dir_path: &Path,
    ) -> anyhow::Result<Vec<(OsString, Slot)>> {
        match cursor {
            Cursor::Absent => Ok(Vec::new()),
            Cursor::Committed(oid) => {
                let tree = self.repository.database().parse_object_as_tree(oid)?;
                Ok(tree
                    .into_entries()
                    .map(|(name, entry)| (name, Slot::new(entry.mode, Some(entry.oid))))
                    .collect())
            }
            Cursor::WorkingDir(path) => {
                let Some(iterator) = self.sources.get(index).and_then(TreeSource::working_tree)
                else {
                    return Ok(Vec::new());
                };

                let workspace = self.repository.workspace();
                let mut slots = Vec::new();
                for entry in workspace.list_dir(path)? {
                    let entry_path = dir_path.join(&entry.name);
                    let oid = if entry.is_dir() || iterator.is_ignored(&entry_path, false) {
                        None
                    } else {
                        Some(workspace.hash_file(&entry_path)?)
                    };
                    slots.push((entry.name, Slot::new(entry.mode, oid)));
                }

                Ok(slots)
            }
        }
    }
}

impl Iterator for TreeWalk<'_> {
    type Item = anyhow::Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(entry) => entry.map(Ok),
            Err(error) => {
                self.pending = Some(Vec::new());
                Some(Err(error))
            }
        }
    }
}
