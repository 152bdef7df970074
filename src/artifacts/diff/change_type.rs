use crate::artifacts::walk::walk_entry::Slot;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }
}

/// How a file of a recorded tree relates to the working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChangeType {
    Added(Slot),
    Deleted(Slot),
    Modified { old: Slot, new: Slot },
}

impl TreeChangeType {
    pub fn from_slots(old: Option<Slot>, new: Option<Slot>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(TreeChangeType::Added(new)),
            (Some(old), None) => Some(TreeChangeType::Deleted(old)),
            (Some(old), Some(new)) if old != new => Some(TreeChangeType::Modified { old, new }),
            _ => None,
        }
    }

    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            TreeChangeType::Added(_) => filter.contains(DiffFilter::ADDED),
            TreeChangeType::Deleted(_) => filter.contains(DiffFilter::DELETED),
            TreeChangeType::Modified { .. } => filter.contains(DiffFilter::MODIFIED),
        }
    }

    pub fn old_slot(&self) -> Option<&Slot> {
        match self {
            TreeChangeType::Deleted(slot) => Some(slot),
            TreeChangeType::Modified { old, .. } => Some(old),
            TreeChangeType::Added(_) => None,
        }
    }

    pub fn new_slot(&self) -> Option<&Slot> {
        match self {
            TreeChangeType::Added(slot) => Some(slot),
            TreeChangeType::Modified { new, .. } => Some(new),
            TreeChangeType::Deleted(_) => None,
        }
    }

    /// One-letter status, as `git diff --name-status` prints it
    pub fn marker(&self) -> char {
        match self {
            TreeChangeType::Added(_) => 'A',
            TreeChangeType::Deleted(_) => 'D',
            TreeChangeType::Modified { .. } => 'M',
        }
    }
}
