/// Parents that take longer to fetch must still come out in date order, and
/// parents sharing a date come out in the order the merge lists them.
use crate::common::log_messages;
use crate::common::store::InMemoryStore;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

#[rstest]
#[case(20, 10, &["M", "slow", "fast"])]
#[case(10, 10, &["M", "slow", "fast"])]
#[case(10, 20, &["M", "fast", "slow"])]
#[tokio::test]
async fn slow_loads_do_not_reorder_history(
    #[case] slow_time: i64,
    #[case] fast_time: i64,
    #[case] expected: &[&str],
) {
    let mut store = InMemoryStore::default();
    let slow = store.commit("slow", &[], slow_time);
    let fast = store.commit("fast", &[], fast_time);
    let merge = store.commit("M", &[&slow, &fast], 30);
    store.delay(&slow, Duration::from_millis(40));
    let store = Arc::new(store);

    let messages = log_messages(store, merge.as_ref()).await.unwrap();

    assert_eq!(messages, expected);
}

#[tokio::test]
async fn parents_of_one_commit_are_fetched_together() {
    let mut store = InMemoryStore::default();
    let parents = (0..4)
        .map(|i| store.commit(&format!("P{i}"), &[], i))
        .collect::<Vec<_>>();
    let merge = store.commit("M", &parents.iter().collect::<Vec<_>>(), 10);
    for parent in &parents {
        store.delay(parent, Duration::from_millis(50));
    }
    let store = Arc::new(store);

    let started = std::time::Instant::now();
    let messages = log_messages(store, merge.as_ref()).await.unwrap();

    assert_eq!(messages, vec!["M", "P3", "P2", "P1", "P0"]);
    assert!(
        started.elapsed() < Duration::from_millis(180),
        "parent loads ran one after another"
    );
}
