use crate::common::store::InMemoryStore;
use crate::common::{init_tracing, tree_paths};
use bit_walk::artifacts::objects::entry_mode::{EntryMode, FileMode};
use bit_walk::{Contents, TreeList};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::sync::Arc;

const FILE: EntryMode = EntryMode::File(FileMode::Regular);

/// `{"b": blob, "a": {"c": blob}}`
#[tokio::test]
async fn entries_are_listed_in_path_order() {
    init_tracing();
    let mut store = InMemoryStore::default();
    let c = store.blob("c\n");
    let b = store.blob("b\n");
    let a = store.tree(&[("c", FILE, &c)]);
    let root = store.tree(&[("b", FILE, &b), ("a", EntryMode::Directory, &a)]);
    let store = Arc::new(store);

    let paths = tree_paths(store.clone(), &root).await.unwrap();
    let again = tree_paths(store, &root).await.unwrap();

    assert_eq!(paths, vec!["/", "/a/", "/a/c", "/b"]);
    assert_eq!(again, paths);
}

/// A directory's path carries its trailing `/` into the comparison, so it
/// sorts after names that continue with a byte below `/` and before names
/// that continue with a byte above it.
#[tokio::test]
async fn directory_sorts_by_its_slash_suffixed_path() {
    let mut store = InMemoryStore::default();
    let blob = store.blob("x\n");
    let nested = store.tree(&[("x", FILE, &blob)]);
    let root = store.tree(&[
        ("a", EntryMode::Directory, &nested),
        ("a-b", FILE, &blob),
        ("a.c", FILE, &blob),
        ("a0", FILE, &blob),
        ("ab", FILE, &blob),
    ]);
    let store = Arc::new(store);

    let paths = tree_paths(store, &root).await.unwrap();

    assert_eq!(
        paths,
        vec!["/", "/a-b", "/a.c", "/a/", "/a/x", "/a0", "/ab"]
    );
}

#[tokio::test]
async fn leaves_are_reported_without_being_fetched() {
    let mut store = InMemoryStore::default();
    let script = store.blob("#!/bin/sh\n");
    let target = store.blob("script.sh");
    let submodule = store.commit("elsewhere", &[], 1);
    let bin = store.tree(&[("script.sh", EntryMode::File(FileMode::Executable), &script)]);
    let root = store.tree(&[
        ("bin", EntryMode::Directory, &bin),
        ("latest", EntryMode::Symlink, &target),
        ("vendor", EntryMode::Gitlink, &submodule),
    ]);
    let store = Arc::new(store);

    let entries = TreeList::new(store.clone(), root.clone())
        .into_walk()
        .await
        .unwrap()
        .into_stream()
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    let summary = entries
        .iter()
        .map(|entry| (entry.path(), entry.mode(), entry.oid()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ("/", EntryMode::Directory, &root),
            ("/bin/", EntryMode::Directory, &bin),
            ("/bin/script.sh", EntryMode::File(FileMode::Executable), &script),
            ("/latest", EntryMode::Symlink, &target),
            ("/vendor", EntryMode::Gitlink, &submodule),
        ]
    );
    assert!(entries.iter().filter(|entry| entry.is_subtree()).all(|entry| matches!(
        entry.contents(),
        Contents::Subtree(Some(_))
    )));
    assert_eq!(store.loads(), vec![root, bin]);
}
