//! The change model
//!
//! A tree of nodes describing how the working copy differs from recorded
//! history: a repository root, the commits being compared, and below each commit
//! the directories and files that differ from the working copy.
//!
//! - `change_node`: the node type shared by every kind, and its parent chain
//! - `sync_data`: the comparison a root is built from
//! - `repository_node`, `commit_node`, `tree_node`, `blob_node`: the node kinds

pub mod blob_node;
pub mod change_node;
pub mod commit_node;
pub mod repository_node;
pub mod sync_data;
pub mod tree_node;
