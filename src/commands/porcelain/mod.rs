//! Porcelain commands (user-facing operations)
//!
//! - `init`: Initialize a new repository
//! - `commit`: Record the working copy as a new commit
//! - `changes`: Show the change model of the working copy against history

pub mod changes;
pub mod commit;
pub mod init;
