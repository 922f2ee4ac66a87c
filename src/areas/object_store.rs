//! Object store seam
//!
//! The walkers never touch the filesystem themselves. Everything they need
//! from a repository goes through [`ObjectStore`]: loading an object body by
//! identity, reading a ref and reading the shallow boundary.
//! [`crate::areas::repository::Repository`] is the
//! on-disk implementation; tests plug in in-memory ones.
//!
//! Implementations must tolerate concurrent reads, since a single expansion
//! of a walk may have many loads in flight at once.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{WalkError, WalkResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Name of the ref holding the shallow-history boundary
pub const SHALLOW_REF_NAME: &str = "shallow";

/// Annotated tags pointing at annotated tags beyond this depth are rejected
const MAX_TAG_DEPTH: usize = 10;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Load the body of `oid`, expected to be of kind `kind`
    ///
    /// `Ok(None)` means the object does not exist; `Err` is reserved for
    /// failures of the store itself (I/O, corruption).
    async fn load_object(
        &self,
        kind: ObjectType,
        oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectBox>>;

    /// Resolve a ref name to the identity it points at
    ///
    /// Unknown refs are `Ok(None)`, distinct from a failing store.
    async fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>>;

    /// Commits at which fetched history stops, empty for a full history
    ///
    /// Defaults to the single identity behind the `shallow` ref. Stores with
    /// a dedicated source for boundaries override it so that an ordinary ref
    /// called `shallow` is never mistaken for one.
    async fn read_shallow(&self) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self.read_ref(SHALLOW_REF_NAME).await?.into_iter().collect())
    }
}

#[async_trait]
impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    async fn load_object(
        &self,
        kind: ObjectType,
        oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectBox>> {
        (**self).load_object(kind, oid).await
    }

    async fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        (**self).read_ref(name).await
    }

    async fn read_shallow(&self) -> anyhow::Result<Vec<ObjectId>> {
        (**self).read_shallow().await
    }
}

#[async_trait]
impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    async fn load_object(
        &self,
        kind: ObjectType,
        oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectBox>> {
        (**self).load_object(kind, oid).await
    }

    async fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        (**self).read_ref(name).await
    }

    async fn read_shallow(&self) -> anyhow::Result<Vec<ObjectId>> {
        (**self).read_shallow().await
    }
}

/// Load `oid` and insist that it is a `kind` object
pub async fn load_as<S: ObjectStore + ?Sized>(
    store: &S,
    kind: ObjectType,
    oid: &ObjectId,
) -> WalkResult<ObjectBox> {
    let object = fetch(store, kind, oid).await?;
    if object.object_type() != kind {
        return Err(WalkError::UnexpectedKind {
            oid: oid.clone(),
            expected: kind,
            found: object.object_type(),
        });
    }

    Ok(object)
}

async fn fetch<S: ObjectStore + ?Sized>(
    store: &S,
    kind: ObjectType,
    oid: &ObjectId,
) -> WalkResult<ObjectBox> {
    match store.load_object(kind, oid).await {
        Ok(Some(object)) => Ok(object),
        Ok(None) => Err(WalkError::NotFound {
            kind,
            oid: oid.clone(),
        }),
        Err(source) => Err(WalkError::LoadFailure {
            target: oid.to_string(),
            source,
        }),
    }
}

pub async fn load_commit<S: ObjectStore + ?Sized>(store: &S, oid: &ObjectId) -> WalkResult<Commit> {
    match load_as(store, ObjectType::Commit, oid).await? {
        ObjectBox::Commit(commit) => Ok(*commit),
        other => Err(WalkError::UnexpectedKind {
            oid: oid.clone(),
            expected: ObjectType::Commit,
            found: other.object_type(),
        }),
    }
}

pub async fn load_tree<S: ObjectStore + ?Sized>(store: &S, oid: &ObjectId) -> WalkResult<Tree> {
    match load_as(store, ObjectType::Tree, oid).await? {
        ObjectBox::Tree(tree) => Ok(*tree),
        other => Err(WalkError::UnexpectedKind {
            oid: oid.clone(),
            expected: ObjectType::Tree,
            found: other.object_type(),
        }),
    }
}

/// Load the commit `oid` names, peeling annotated tags on the way
///
/// Returns the identity of the commit reached alongside its body.
pub async fn peel_to_commit<S: ObjectStore + ?Sized>(
    store: &S,
    oid: &ObjectId,
) -> WalkResult<(ObjectId, Commit)> {
    let mut target = oid.clone();

    for _ in 0..=MAX_TAG_DEPTH {
        match fetch(store, ObjectType::Commit, &target).await? {
            ObjectBox::Commit(commit) => return Ok((target, *commit)),
            ObjectBox::Tag(tag) => target = tag.target().clone(),
            other => {
                return Err(WalkError::UnexpectedKind {
                    oid: target,
                    expected: ObjectType::Commit,
                    found: other.object_type(),
                });
            }
        }
    }

    Err(WalkError::LoadFailure {
        target: oid.to_string(),
        source: anyhow::anyhow!("tag chain starting at {oid} is too deep"),
    })
}
