use filestash_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    event::{CollectionInfo, EventKind, EventOutcome, StoreEvent},
    store::{DocumentStore, IntoDynDocumentStore},
};
use filestash_fs::{FileSystemStore, IoMode};
use serde_json::{Value, json};
use std::path::Path;

fn documents() -> Vec<Value> {
    vec![
        json!({ "_id": "1111", "name": "John", "lastname": "Abruzzi" }),
        json!({ "_id": 7, "tags": ["a", "b"], "nested": { "k": null } }),
        json!({ "name": "no id" }),
    ]
}

fn users(docs: Vec<Value>) -> StoreEvent {
    StoreEvent::new(CollectionInfo::new("app", "users").with_docs(docs))
}

async fn build(root: &Path, synchronous: bool) -> FileSystemStore {
    FileSystemStore::builder()
        .root_path(root)
        .synchronous(synchronous)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn blocking_and_async_modes_write_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let blocking = build(&dir.path().join("blocking"), true).await;
    let nonblocking = build(&dir.path().join("async"), false).await;

    assert_eq!(blocking.io_mode(), IoMode::Blocking);
    assert_eq!(nonblocking.io_mode(), IoMode::Async);

    for store in [&blocking, &nonblocking] {
        assert!(store.create_collection(&users(vec![])).await.unwrap());
        assert!(store.insert(&users(documents())).await.unwrap());
    }

    let blocking_bytes =
        std::fs::read(blocking.collection_path("app", "users").unwrap()).unwrap();
    let async_bytes =
        std::fs::read(nonblocking.collection_path("app", "users").unwrap()).unwrap();
    assert_eq!(blocking_bytes, async_bytes);

    let from_blocking = blocking.find(&users(vec![])).await.unwrap();
    let from_async = nonblocking.find(&users(vec![])).await.unwrap();
    assert_eq!(from_blocking, from_async);
    assert_eq!(from_async.documents, documents());
    assert_eq!(from_async.indexes.len(), 2);
    assert_eq!(from_async.indexes.get("7"), Some(&1));
}

#[test]
fn blocking_store_runs_without_a_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSystemStore::builder()
        .root_path(dir.path())
        .build_blocking()
        .unwrap();

    assert_eq!(store.backend().io_mode(), IoMode::Blocking);
    assert!(store.create_collection(&users(vec![])).unwrap());
    assert!(store.insert(&users(documents())).unwrap());
    assert_eq!(store.find_one(&users(vec![])).unwrap().len(), 3);

    match store.dispatch(EventKind::Find, &users(vec![])).unwrap() {
        EventOutcome::Found(result) => assert_eq!(result.get("1111").unwrap()["name"], "John"),
        other => panic!("unexpected outcome {other:?}"),
    }

    assert!(store.dispatch(EventKind::Backup, &users(vec![])).is_err());
}

#[tokio::test]
async fn dynamic_store_dispatches_host_events() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(build(dir.path(), false).await).into_dyn();

    for (name, docs) in [
        ("createCollection", vec![]),
        ("insert", documents()),
        ("update", documents()[..1].to_vec()),
    ] {
        let kind: EventKind = name.parse().unwrap();
        assert_eq!(
            store.dispatch(kind, &users(docs)).await.unwrap(),
            EventOutcome::Acknowledged(true)
        );
    }

    let outcome = store
        .dispatch(EventKind::FindOne, &users(vec![]))
        .await
        .unwrap();
    let EventOutcome::Found(result) = outcome else {
        panic!("findOne must produce documents");
    };
    assert_eq!(result.documents, documents()[..1].to_vec());

    let backend = store.downcast_ref::<FileSystemStore>().unwrap();
    assert!(backend.collection_path("app", "users").unwrap().is_file());

    store.shutdown().await.unwrap();
}
