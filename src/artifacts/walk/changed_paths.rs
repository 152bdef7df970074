use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::tree_filter::TreeFilter;
use crate::artifacts::walk::tree_source::WorkingTreeIterator;
use crate::artifacts::walk::tree_walk::TreeWalk;
use std::path::{Path, PathBuf};

/// Paths of the files that differ between the tree `base` and the working copy,
/// leaving out anything the ignore rules exclude
///
/// # Arguments
///
/// * `repository` - Repository whose database and working copy are compared
/// * `base` - Recorded tree to compare against
/// * `base_path` - Working-copy directory `base` stands for, empty for the root
///
/// # Returns
///
/// Repository-relative paths in walk order, which is stable for the same pair
/// of snapshots
pub fn not_ignored_paths(
    repository: &Repository,
    base: &ObjectId,
    base_path: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut walk = TreeWalk::for_differences(repository);
    walk.set_recursive(true);
    walk.set_base_path(base_path);
    walk.add_tree(base)?;
    let working_tree = walk.add_working_tree(WorkingTreeIterator::new(repository)?);
    let filter = walk.tree_filter().clone().and(TreeFilter::NotIgnored(working_tree));
    walk.set_filter(filter);

    let paths = walk
        .map(|entry| entry.map(|entry| entry.path().to_path_buf()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::debug!(
        base = %base,
        base_path = %base_path.display(),
        changed = paths.len(),
        "listed changed paths"
    );
    Ok(paths)
}
