use crate::areas::repository::Repository;
use crate::artifacts::diff::change_type::{DiffFilter, TreeChangeType};
use crate::artifacts::model::change_node::{ChangeNode, NodeKind};
use crate::artifacts::model::sync_data::SyncData;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct ChangesOptions {
    pub source: Option<String>,
    pub destination: Option<String>,
    /// Levels shown below the root; unlimited when absent
    pub depth: Option<usize>,
    pub diff_filter: DiffFilter,
    /// Print the changed paths of the destination commit instead of the tree
    pub flat: bool,
}

impl Default for ChangesOptions {
    fn default() -> Self {
        ChangesOptions {
            source: None,
            destination: None,
            depth: None,
            diff_filter: DiffFilter::all(),
            flat: false,
        }
    }
}

impl Repository {
    pub fn changes(self: &Arc<Self>, opts: &ChangesOptions) -> anyhow::Result<()> {
        let mut data = SyncData::new(self.clone());
        if let Some(source) = &opts.source {
            data = data.with_source(source.as_str());
        }
        if let Some(destination) = &opts.destination {
            data = data.with_destination(destination.as_str());
        }
        let root = ChangeNode::create_root(data)?;

        if opts.flat {
            return self.show_changed_paths(&root);
        }

        let mut lines = vec![root.name().bold().to_string()];
        lines.extend(self.render_children(&root, 1, opts)?);
        for line in lines {
            writeln!(self.writer(), "{}", line)?;
        }

        Ok(())
    }

    fn show_changed_paths(&self, root: &ChangeNode<'_>) -> anyhow::Result<()> {
        let NodeKind::Repository(root_kind) = root.kind() else {
            anyhow::bail!("not a repository node: {}", root.name());
        };
        let Some(destination) = root_kind.destination() else {
            return Ok(());
        };

        let commit = self.database().parse_object_as_commit(destination)?;
        for path in root.not_ignored_paths(commit.tree_oid())? {
            writeln!(self.writer(), "{}", path.display())?;
        }

        Ok(())
    }

    /// Lines for the children of `node`, `level` levels below the root
    ///
    /// Directories are left out when nothing below them is shown.
    fn render_children(
        &self,
        node: &ChangeNode<'_>,
        level: usize,
        opts: &ChangesOptions,
    ) -> anyhow::Result<Vec<String>> {
        if opts.depth.is_some_and(|depth| level > depth) {
            return Ok(Vec::new());
        }

        let indent = INDENT.repeat(level);
        let mut lines = Vec::new();
        for child in node.children()? {
            match child.kind() {
                NodeKind::Repository(_) => {}
                NodeKind::Commit(_) => {
                    lines.push(format!("{indent}{}", child.name().yellow()));
                    lines.extend(self.render_children(&child, level + 1, opts)?);
                }
                NodeKind::Tree(_) => {
                    let below = self.render_children(&child, level + 1, opts)?;
                    let at_depth_limit = opts.depth.is_some_and(|depth| level >= depth);
                    if below.is_empty() && !at_depth_limit {
                        continue;
                    }
                    lines.push(format!("{indent}{}/", child.name().blue()));
                    lines.extend(below);
                }
                NodeKind::Blob(blob) => {
                    if !blob.change().matches_filter(opts.diff_filter) {
                        continue;
                    }
                    lines.push(format!(
                        "{indent}{} {}",
                        colored_marker(blob.change()),
                        child.name()
                    ));
                }
            }
        }

        Ok(lines)
    }
}

fn colored_marker(change: &TreeChangeType) -> String {
    let marker = change.marker().to_string();
    match change {
        TreeChangeType::Added(_) => marker.green().to_string(),
        TreeChangeType::Deleted(_) => marker.red().to_string(),
        TreeChangeType::Modified { .. } => marker.yellow().to_string(),
    }
}
