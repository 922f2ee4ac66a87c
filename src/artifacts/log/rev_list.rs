use crate::areas::object_store::{ObjectStore, SHALLOW_REF_NAME, load_commit, peel_to_commit};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::revision::resolve;
use crate::artifacts::walk::OrderedWalk;
use crate::errors::{WalkError, WalkResult};
use derive_new::new;
use futures::future::{BoxFuture, FutureExt};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

type ScanParents = Box<dyn FnMut(&CommitNode) -> Vec<ObjectId> + Send>;
type LoadCommit = Box<dyn FnMut(ObjectId) -> BoxFuture<'static, WalkResult<CommitNode>> + Send>;
type CompareCommits = fn(&CommitNode, &CommitNode) -> Ordering;

/// Lazy history walk, newest commit first
pub type LogWalk = OrderedWalk<CommitNode, ObjectId, ScanParents, LoadCommit, CompareCommits>;

/// A commit as emitted by a history walk
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitNode {
    oid: ObjectId,
    commit: Commit,
    /// Set on the commit at the shallow boundary; its parents are not walked
    boundary: bool,
}

impl CommitNode {
    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn into_commit(self) -> Commit {
        self.commit
    }

    pub fn parents(&self) -> &[ObjectId] {
        self.commit.parents()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.commit.timestamp()
    }

    pub fn is_boundary(&self) -> bool {
        self.boundary
    }
}

/// Revision list starting at a single revision
///
/// Walks every commit reachable from the start, most recent author date
/// first, visiting each commit once however many paths lead to it. When the
/// store has shallow boundaries, the walk includes each boundary commit it
/// reaches (flagged via [`CommitNode::is_boundary`]) and goes no further along
/// it. A start revision naming an annotated tag starts at the tagged commit.
#[derive(new)]
pub struct RevList<S> {
    store: Arc<S>,
    start_revision: String,
}

impl<S: ObjectStore + 'static> RevList<S> {
    pub async fn into_walk(self) -> WalkResult<LogWalk> {
        let shallow = self
            .store
            .read_shallow()
            .await
            .map_err(|source| WalkError::LoadFailure {
                target: SHALLOW_REF_NAME.to_string(),
                source,
            })?
            .into_iter()
            .collect::<HashSet<_>>();
        let start = resolve(&*self.store, &self.start_revision).await?;

        let (start, commit) = peel_to_commit(&*self.store, &start).await?;
        let root_is_boundary = shallow.contains(&start);
        debug!(%start, boundaries = shallow.len(), "starting history walk");

        let mut seen = HashSet::from([start.clone()]);
        let scan: ScanParents = Box::new(move |node: &CommitNode| {
            if node.is_boundary() {
                return Vec::new();
            }
            node.parents()
                .iter()
                .filter(|parent| seen.insert((*parent).clone()))
                .cloned()
                .collect::<Vec<_>>()
        });

        let store = self.store;
        let load: LoadCommit = Box::new(move |oid: ObjectId| {
            let store = store.clone();
            let boundary = shallow.contains(&oid);
            async move {
                let commit = load_commit(&*store, &oid).await?;
                Ok::<_, WalkError>(CommitNode::new(oid, commit, boundary))
            }
            .boxed()
        });

        Ok(OrderedWalk::new(
            CommitNode::new(start, commit, root_is_boundary),
            scan,
            load,
            newest_first as CompareCommits,
        ))
    }
}

/// Descending author timestamp
fn newest_first(commit: &CommitNode, other: &CommitNode) -> Ordering {
    other.timestamp().cmp(&commit.timestamp())
}
