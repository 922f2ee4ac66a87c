/// History:
/// ```
///   P1 (t=20)   P2 (t=10, unreachable)
///        \     /
///         M (t=30)
/// ```
use crate::common::objects::RawObject;
use crate::common::store::InMemoryStore;
use bit_walk::artifacts::objects::object_type::ObjectType;
use bit_walk::{RevList, WalkError};
use std::sync::Arc;

#[tokio::test]
async fn failed_load_fails_a_single_pull() {
    let mut store = InMemoryStore::default();
    let p1 = store.commit("P1", &[], 20);
    let p2 = store.commit("P2", &[], 10);
    let m = store.commit("M", &[&p1, &p2], 30);
    store.fail_on(&p2);
    let store = Arc::new(store);

    let mut walk = RevList::new(store, m.to_string())
        .into_walk()
        .await
        .unwrap();

    let first = walk.next().await.unwrap().unwrap();
    assert_eq!(first.oid(), &m);

    let failure = walk.next().await.unwrap().unwrap_err();
    assert!(matches!(failure, WalkError::LoadFailure { ref target, .. } if *target == p2.to_string()));

    let rest = walk.next().await.unwrap().unwrap();
    assert_eq!(rest.oid(), &p1);
    assert!(walk.next().await.is_none());
}

#[tokio::test]
async fn missing_parent_is_reported_as_not_found() {
    let mut store = InMemoryStore::default();
    let tree = store.tree(&[]);
    let never_stored = RawObject::commit(&tree, &[], 1, "lost").oid();
    let child = store.commit("child", &[&never_stored], 2);
    let store = Arc::new(store);

    let mut walk = RevList::new(store, child.to_string())
        .into_walk()
        .await
        .unwrap();

    assert_eq!(walk.next().await.unwrap().unwrap().oid(), &child);
    let failure = walk.next().await.unwrap().unwrap_err();
    assert_eq!(failure.to_string(), format!("missing commit {never_stored}"));
    assert!(matches!(
        failure,
        WalkError::NotFound { kind: ObjectType::Commit, .. }
    ));
    assert!(walk.next().await.is_none());
}
