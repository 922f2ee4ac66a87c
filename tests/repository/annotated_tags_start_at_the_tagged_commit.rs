use crate::common::loose::{LooseRepo, loose_repo};
use crate::common::objects::RawObject;
use bit_walk::WalkError;
use bit_walk::artifacts::objects::object_type::ObjectType;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn annotated_tags_start_at_the_tagged_commit(loose_repo: LooseRepo) {
    let first = loose_repo.commit("first", &[], 1_700_000_000);
    let second = loose_repo.commit("second", &[&first], 1_700_000_100);
    let tag = loose_repo.write(RawObject::tag(&second, ObjectType::Commit, "v1.0"));
    let tag_of_tag = loose_repo.write(RawObject::tag(&tag, ObjectType::Tag, "v1.0-signed"));
    loose_repo.set_ref("refs/tags/v1.0", &tag);
    let repository = loose_repo.open();

    for revision in ["v1.0", tag.as_ref(), tag_of_tag.as_ref()] {
        let oids = repository
            .log_walk(revision)
            .await
            .unwrap()
            .into_stream()
            .map_ok(|node| node.oid().clone())
            .try_collect::<Vec<_>>()
            .await
            .unwrap();

        assert_eq!(oids, vec![second.clone(), first.clone()], "{revision}");
    }
}

#[rstest]
#[tokio::test]
async fn tag_of_a_tree_is_an_unexpected_kind(loose_repo: LooseRepo) {
    let blob = loose_repo.write(RawObject::blob("content"));
    let tree = loose_repo.write(RawObject::tree(&[]));
    let tree_tag = loose_repo.write(RawObject::tag(&tree, ObjectType::Tree, "tree-tag"));
    let blob_tag = loose_repo.write(RawObject::tag(&blob, ObjectType::Blob, "blob-tag"));
    let repository = loose_repo.open();

    let error = repository.log_walk(tree_tag.as_ref()).await.err().unwrap();
    assert!(matches!(
        error,
        WalkError::UnexpectedKind {
            ref oid,
            expected: ObjectType::Commit,
            found: ObjectType::Tree,
        } if *oid == tree
    ));

    let error = repository.log_walk(blob_tag.as_ref()).await.err().unwrap();
    assert!(matches!(
        error,
        WalkError::UnexpectedKind { found: ObjectType::Blob, .. }
    ));
}

#[rstest]
#[tokio::test]
async fn tree_walk_of_a_tag_is_an_unexpected_kind(loose_repo: LooseRepo) {
    let tree = loose_repo.write(RawObject::tree(&[]));
    let tag = loose_repo.write(RawObject::tag(&tree, ObjectType::Tree, "tree-tag"));

    let error = loose_repo.open().tree_walk(&tag).await.err().unwrap();

    assert!(matches!(
        error,
        WalkError::UnexpectedKind {
            expected: ObjectType::Tree,
            found: ObjectType::Tag,
            ..
        }
    ));
}
