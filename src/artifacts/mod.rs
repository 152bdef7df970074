//! Data structures and algorithms
//!
//! - `core`: Shared utilities (pager wrapper)
//! - `database`: Database entry and store error types
//! - `diff`: Change classification between a tree and the working copy
//! - `log`: Revision expressions and commit ranges
//! - `model`: The change model (repository, commit, tree and blob nodes)
//! - `objects`: Object types (blob, tree, commit)
//! - `walk`: Synchronized tree walks and ignore rules

pub mod core;
pub mod database;
pub mod diff;
pub mod log;
pub mod model;
pub mod objects;
pub mod walk;
