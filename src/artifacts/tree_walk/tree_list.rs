use crate::areas::object_store::{ObjectStore, load_tree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::tree_walk::walk_entry::{Contents, WalkEntry};
use crate::artifacts::walk::OrderedWalk;
use crate::errors::{WalkError, WalkResult};
use derive_new::new;
use futures::future::{self, BoxFuture, FutureExt};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

type ScanEntries = fn(&WalkEntry) -> Vec<WalkEntry>;
type LoadEntry = Box<dyn FnMut(WalkEntry) -> BoxFuture<'static, WalkResult<WalkEntry>> + Send>;
type CompareEntries = fn(&WalkEntry, &WalkEntry) -> Ordering;

/// Lazy tree walk in ascending path order
pub type TreeWalk = OrderedWalk<WalkEntry, WalkEntry, ScanEntries, LoadEntry, CompareEntries>;

/// Recursive listing of a tree
///
/// Yields the root (`/`) and every entry below it, ordered by the raw bytes
/// of their paths. Directory paths carry their trailing `/` into the
/// comparison, so `a` < `a/` < `ab`. Directories are fetched as they are
/// reached; other entries are reported without loading their objects.
#[derive(new)]
pub struct TreeList<S> {
    store: Arc<S>,
    root_oid: ObjectId,
}

impl<S: ObjectStore + 'static> TreeList<S> {
    pub async fn into_walk(self) -> WalkResult<TreeWalk> {
        let body = load_tree(&*self.store, &self.root_oid).await?;
        debug!(root = %self.root_oid, entries = body.len(), "starting tree walk");

        let store = self.store;
        let load: LoadEntry = Box::new(move |entry: WalkEntry| {
            let needs_body = match entry.contents() {
                Contents::Subtree(None) => true,
                Contents::Subtree(Some(_)) | Contents::Leaf(_) => false,
            };
            if !needs_body {
                return future::ready(Ok(entry)).boxed();
            }

            let store = store.clone();
            async move {
                let body = load_tree(&*store, entry.oid()).await?;
                Ok::<_, WalkError>(entry.with_body(body))
            }
            .boxed()
        });

        Ok(OrderedWalk::new(
            WalkEntry::root(self.root_oid, body),
            WalkEntry::children as ScanEntries,
            load,
            by_path as CompareEntries,
        ))
    }
}

fn by_path(entry: &WalkEntry, other: &WalkEntry) -> Ordering {
    entry.path().as_bytes().cmp(other.path().as_bytes())
}
