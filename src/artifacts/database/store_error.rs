//! Typed object store failures
//!
//! Every read of the object database that fails surfaces one of these, wrapped in an
//! `anyhow::Error`. Callers that need to tell the kinds apart use
//! [`StoreError::find`] on the error chain.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced object does not exist in the database.
    #[error("missing object {oid}")]
    MissingObject { oid: ObjectId },

    /// The object exists but is not of the kind the caller asked for.
    #[error("object {oid} is a {actual}, expected a {expected}")]
    UnexpectedObjectType {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    /// The store could not be read.
    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether this failure means the requested object cannot be used at all.
    ///
    /// An object of the wrong kind counts as missing.
    pub fn is_missing_object(&self) -> bool {
        matches!(
            self,
            StoreError::MissingObject { .. } | StoreError::UnexpectedObjectType { .. }
        )
    }

    /// Find the first `StoreError` in an error chain
    pub fn find(error: &anyhow::Error) -> Option<&StoreError> {
        error.chain().find_map(|cause| cause.downcast_ref::<StoreError>())
    }
}
