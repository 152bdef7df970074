//! Change model of a repository's working copy against its history
//!
//! - `areas`: repository components (object database, refs, working copy, config)
//! - `artifacts`: objects, tree walks, and the change model built on them
//! - `commands`: operations behind the `bitsync` command line

pub mod areas;
pub mod artifacts;
pub mod commands;
