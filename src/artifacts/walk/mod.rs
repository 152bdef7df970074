//! Tree walking over recorded trees and the working copy
//!
//! - `tree_walk`: synchronized walk over any number of trees
//! - `tree_filter`: composable entry predicates (difference, ignore rules)
//! - `tree_source`: recorded, empty and working-copy trees
//! - `walk_entry`: one visited name and its state in each tree
//! - `ignore_rules`: gitignore handling for the working copy
//! - `changed_paths`: changed, non-ignored paths under a tree

pub mod changed_paths;
pub mod ignore_rules;
pub mod tree_filter;
pub mod tree_source;
pub mod tree_walk;
pub mod walk_entry;
