//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. The change model
//! reads three of them:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//!
//! All objects implement serialization/deserialization for the Git object format:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
