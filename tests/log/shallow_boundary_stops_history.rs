/// History: A <- B <- C <- D, fetched shallowly down to B
///
/// The walk includes B, flags it, and never asks for A.
use crate::common::store::InMemoryStore;
use bit_walk::RevList;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn shallow_boundary_stops_history() {
    let mut store = InMemoryStore::default();
    let a = store.commit("A", &[], 1);
    let b = store.commit("B", &[&a], 2);
    let c = store.commit("C", &[&b], 3);
    let d = store.commit("D", &[&c], 4);
    store.set_ref("shallow", &b);
    let store = Arc::new(store);

    let nodes = RevList::new(store.clone(), d.to_string())
        .into_walk()
        .await
        .unwrap()
        .into_stream()
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    let summary = nodes
        .iter()
        .map(|node| (node.commit().short_message(), node.is_boundary()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("D".to_string(), false),
            ("C".to_string(), false),
            ("B".to_string(), true),
        ]
    );
    assert_eq!(store.load_count(&a), 0);
}

#[tokio::test]
async fn shallow_boundary_at_the_start_yields_only_the_start() {
    let mut store = InMemoryStore::default();
    let a = store.commit("A", &[], 1);
    let b = store.commit("B", &[&a], 2);
    store.set_ref("shallow", &b);
    let store = Arc::new(store);

    let mut walk = RevList::new(store.clone(), b.to_string())
        .into_walk()
        .await
        .unwrap();

    let first = walk.next().await.unwrap().unwrap();
    assert!(first.is_boundary());
    assert_eq!(first.oid(), &b);
    assert!(walk.next().await.is_none());
    assert_eq!(store.load_count(&a), 0);
}

#[tokio::test]
async fn without_a_boundary_the_whole_history_is_listed() {
    let mut store = InMemoryStore::default();
    let a = store.commit("A", &[], 1);
    let b = store.commit("B", &[&a], 2);
    let store = Arc::new(store);

    let nodes = RevList::new(store, b.to_string())
        .into_walk()
        .await
        .unwrap()
        .into_stream()
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|node| !node.is_boundary()));
}
