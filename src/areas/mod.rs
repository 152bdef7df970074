//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `config`: Environment driven settings
//! - `database`: Object database for storing blobs, trees, and commits
//! - `projects`: Project directories found in the working copy
//! - `refs`: Reference management (branches, HEAD)
//! - `repository`: Handle tying the components together
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod projects;
pub mod refs;
pub mod repository;
pub mod workspace;
