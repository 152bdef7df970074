//! Database entry and error types
//!
//! This module contains the types used when reading objects from the database:
//! entries referencing objects with their mode, and the typed failures a read can
//! produce.

pub mod database_entry;
pub mod store_error;
