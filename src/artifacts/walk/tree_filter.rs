//! Predicates deciding which walk entries are reported
//!
//! Each predicate looks at a single entry and the trees it was read from, so
//! filters can be combined freely and checked without walking anything.

use crate::artifacts::walk::tree_source::TreeSource;
use crate::artifacts::walk::walk_entry::WalkEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeFilter {
    /// Every entry
    All,
    /// Entries that are not identical in all the walked trees
    AnyDiff,
    /// Entries not excluded by the ignore rules of the working tree at this index
    NotIgnored(usize),
    /// Entries accepted by every inner filter
    And(Vec<TreeFilter>),
}

impl TreeFilter {
    pub fn and(self, other: TreeFilter) -> TreeFilter {
        match self {
            TreeFilter::All => other,
            TreeFilter::And(mut filters) => {
                filters.push(other);
                TreeFilter::And(filters)
            }
            filter => TreeFilter::And(vec![filter, other]),
        }
    }

    pub fn include(&self, entry: &WalkEntry, sources: &[TreeSource]) -> bool {
        match self {
            TreeFilter::All => true,
            TreeFilter::AnyDiff => any_diff(entry),
            TreeFilter::NotIgnored(index) => not_ignored(entry, sources, *index),
            TreeFilter::And(filters) => filters.iter().all(|filter| filter.include(entry, sources)),
        }
    }

    /// Whether the filter depends on the content of entries
    ///
    /// A directory passing such a filter may still contain nothing that does.
    pub fn is_diff_sensitive(&self) -> bool {
        match self {
            TreeFilter::AnyDiff => true,
            TreeFilter::And(filters) => filters.iter().any(TreeFilter::is_diff_sensitive),
            TreeFilter::All | TreeFilter::NotIgnored(_) => false,
        }
    }
}

fn any_diff(entry: &WalkEntry) -> bool {
    let slots = entry.slots();
    if slots.len() < 2 {
        return true;
    }

    let Some(first) = &slots[0] else {
        return slots[1..].iter().any(Option::is_some);
    };

    slots[1..].iter().any(|slot| match slot {
        None => true,
        Some(slot) => {
            slot.mode != first.mode
                || slot.oid.is_none()
                || first.oid.is_none()
                || slot.oid != first.oid
        }
    })
}

fn not_ignored(entry: &WalkEntry, sources: &[TreeSource], index: usize) -> bool {
    let Some(working_tree) = sources.get(index).and_then(TreeSource::working_tree) else {
        return true;
    };

    !working_tree.is_ignored(entry.path(), entry.is_tree())
}
