#![allow(dead_code)]

pub mod store;

use bit_walk::artifacts::objects::object_id::ObjectId;
use bit_walk::{ObjectStore, RevList, TreeList, WalkResult};
use futures::TryStreamExt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Subjects of the commits a history walk from `start` yields
pub async fn log_messages<S: ObjectStore + 'static>(
    store: Arc<S>,
    start: &str,
) -> WalkResult<Vec<String>> {
    RevList::new(store, start.to_string())
        .into_walk()
        .await?
        .into_stream()
        .map_ok(|node| node.commit().short_message())
        .try_collect()
        .await
}

/// Paths a tree walk from `root` yields
pub async fn tree_paths<S: ObjectStore + 'static>(
    store: Arc<S>,
    root: &ObjectId,
) -> WalkResult<Vec<String>> {
    TreeList::new(store, root.clone())
        .into_walk()
        .await?
        .into_stream()
        .map_ok(|entry| entry.path().to_string())
        .try_collect()
        .await
}
