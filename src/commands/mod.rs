//! Command implementations
//!
//! - `plumbing`: Low-level object commands (hash-object, write-tree)
//! - `porcelain`: User-facing commands (init, commit, changes)

pub mod plumbing;
pub mod porcelain;
