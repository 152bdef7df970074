//! Commit history
//!
//! - `revision`: revision expressions (`HEAD~2`, `@^`, abbreviated ids)
//! - `rev_list`: the commits between two endpoints, newest first

pub mod rev_list;
pub mod revision;
