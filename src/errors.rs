//! Traversal error types
//!
//! Store implementations speak `anyhow`; the walkers translate what comes back
//! into this taxonomy so callers can tell a missing object from a broken store.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    /// The identity has no corresponding object.
    #[error("missing {kind} {oid}")]
    NotFound { kind: ObjectType, oid: ObjectId },

    /// A symbolic name did not resolve, or an identity is malformed.
    #[error("bad ref {0}")]
    BadReference(String),

    /// The store failed while fetching an object or reading a ref.
    #[error("failed to load {target}: {source}")]
    LoadFailure {
        target: String,
        #[source]
        source: anyhow::Error,
    },

    /// The object exists but is not of the requested kind.
    #[error("object {oid} is a {found}, not a {expected}")]
    UnexpectedKind {
        oid: ObjectId,
        expected: ObjectType,
        found: ObjectType,
    },
}

pub type WalkResult<T> = Result<T, WalkError>;
