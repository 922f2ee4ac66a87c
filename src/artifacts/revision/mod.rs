//! Reference resolution
//!
//! Turns what a caller typed (a full object id, a branch, `HEAD`, an
//! abbreviation) into a concrete identity before any traversal starts.
//!
//! Only the canonical 40-character lowercase hex form is taken literally.
//! Everything else is handed to the store's `read_ref`, which decides what
//! names it understands (the on-disk repository follows git's lookup rules and
//! accepts unique abbreviations).

use crate::areas::object_store::ObjectStore;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{WalkError, WalkResult};
use tracing::debug;

/// Resolve `hashish` to an object identity
///
/// Literal identities are returned unchanged without consulting the store.
pub async fn resolve<S: ObjectStore + ?Sized>(store: &S, hashish: &str) -> WalkResult<ObjectId> {
    if ObjectId::is_literal(hashish) {
        return ObjectId::try_parse(hashish.to_string())
            .map_err(|_| WalkError::BadReference(hashish.to_string()));
    }
    if hashish.trim().is_empty() {
        return Err(WalkError::BadReference(hashish.to_string()));
    }

    match store.read_ref(hashish).await {
        Ok(Some(oid)) => {
            debug!(name = hashish, %oid, "resolved reference");
            Ok(oid)
        }
        Ok(None) => Err(WalkError::BadReference(hashish.to_string())),
        Err(source) => Err(WalkError::LoadFailure {
            target: hashish.to_string(),
            source,
        }),
    }
}
