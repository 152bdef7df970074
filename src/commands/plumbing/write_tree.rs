use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::walk::ignore_rules::IgnoreRules;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Store every non-ignored file of the working copy and the trees holding them
    ///
    /// Directories left empty once ignored files are dropped are not recorded.
    ///
    /// # Returns
    ///
    /// The id of the root tree
    pub fn write_tree(&self) -> anyhow::Result<ObjectId> {
        let rules = self.ignore_rules()?;
        let tree_id = self
            .write_dir_tree(&rules, Path::new(""))?
            .context("The root tree is always written")?;

        tracing::debug!(tree = %tree_id, "wrote working copy tree");
        Ok(tree_id)
    }

    fn write_dir_tree(&self, rules: &IgnoreRules, dir: &Path) -> anyhow::Result<Option<ObjectId>> {
        let mut tree = Tree::default();

        for entry in self.workspace().list_dir(dir)? {
            let path = dir.join(&entry.name);
            if rules.is_ignored(&path, entry.is_dir()) {
                continue;
            }

            if entry.is_dir() {
                if let Some(subtree_id) = self.write_dir_tree(rules, &path)? {
                    tree.insert(entry.name, DatabaseEntry::new(subtree_id, EntryMode::Directory))?;
                }
            } else {
                let blob = self.workspace().parse_blob(&path)?;
                let blob_id = self.database().store(&blob)?;
                tree.insert(entry.name, DatabaseEntry::new(blob_id, entry.mode))?;
            }
        }

        if tree.is_empty() && !dir.as_os_str().is_empty() {
            return Ok(None);
        }

        Ok(Some(self.database().store(&tree)?))
    }

    pub fn print_tree_id(&self) -> anyhow::Result<()> {
        let tree_id = self.write_tree()?;
        writeln!(self.writer(), "{}", tree_id)?;
        Ok(())
    }
}
