//! Plumbing commands (low-level operations)
//!
//! - `hash-object`: Compute a blob id and optionally store the blob
//! - `write-tree`: Store the non-ignored working copy as tree objects

pub mod hash_object;
pub mod write_tree;
