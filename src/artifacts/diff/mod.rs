//! Classification of changes between a recorded tree and the working copy
//!
//! - `change_type`: added / deleted / modified, and the `--diff-filter` flags

pub mod change_type;
