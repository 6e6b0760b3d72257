//! Front types that route host events to a backend.
//!
//! This module provides the API a host integration talks to:
//!
//! - [`DocumentStore`] - Typed store bound to a specific backend implementation
//! - [`DynDocumentStore`] - Dynamic dispatch store for runtime backend selection
//! - [`BlockingDocumentStore`] - Blocking wrapper for hosts without an async runtime
//!
//! Every store exposes one method per lifecycle event plus [`DocumentStore::dispatch`],
//! which routes an event by its host-side name.
//!
//! # Example
//!
//! ```ignore
//! use filestash_core::{store::DocumentStore, event::{CollectionInfo, EventKind, StoreEvent}};
//!
//! let store = DocumentStore::new(backend);
//! let event = StoreEvent::new(CollectionInfo::new("app", "users"));
//! store.dispatch("createCollection".parse::<EventKind>()?, &event).await?;
//! ```

use futures::executor::block_on;

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    document::FindResult,
    error::StoreResult,
    event::{EventKind, EventOutcome, StoreEvent},
};

/// A document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

/// A document store over a boxed backend chosen at runtime.
pub type DynDocumentStore = DocumentStore<Box<dyn DynStoreBackend>>;

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the store, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Routes a host event to the matching handler.
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler returns, including
    /// [`StoreError::NotImplemented`](crate::error::StoreError::NotImplemented) for events
    /// the backend does not support.
    pub async fn dispatch(&self, kind: EventKind, event: &StoreEvent) -> StoreResult<EventOutcome> {
        let backend = &self.backend;

        Ok(match kind {
            EventKind::CreateCollection => EventOutcome::Acknowledged(StoreBackend::create_collection(backend, event).await?),
            EventKind::Insert => EventOutcome::Acknowledged(StoreBackend::insert(backend, event).await?),
            EventKind::Save => EventOutcome::Acknowledged(StoreBackend::save(backend, event).await?),
            EventKind::All => EventOutcome::Found(StoreBackend::all(backend, event).await?),
            EventKind::Find => EventOutcome::Found(StoreBackend::find(backend, event).await?),
            EventKind::FindOne => EventOutcome::Found(StoreBackend::find_one(backend, event).await?),
            EventKind::Update => EventOutcome::Acknowledged(StoreBackend::update(backend, event).await?),
            EventKind::Remove => EventOutcome::Acknowledged(StoreBackend::remove(backend, event).await?),
            EventKind::EnsureIndex => EventOutcome::Acknowledged(StoreBackend::ensure_index(backend, event).await?),
            EventKind::Backup => EventOutcome::Acknowledged(StoreBackend::backup(backend, event).await?),
            EventKind::Backups => EventOutcome::Backups(StoreBackend::backups(backend, event).await?),
            EventKind::RemoveBackup => EventOutcome::Acknowledged(StoreBackend::remove_backup(backend, event).await?),
            EventKind::Restore => EventOutcome::Acknowledged(StoreBackend::restore(backend, event).await?),
        })
    }

    /// Handles a `createCollection` event.
    pub async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::create_collection(&self.backend, event).await
    }

    /// Handles an `insert` event.
    pub async fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::insert(&self.backend, event).await
    }

    /// Handles an `update` event.
    pub async fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::update(&self.backend, event).await
    }

    /// Handles a `remove` event.
    pub async fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::remove(&self.backend, event).await
    }

    /// Handles a `find` event.
    pub async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        StoreBackend::find(&self.backend, event).await
    }

    /// Handles a `findOne` event.
    pub async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        StoreBackend::find_one(&self.backend, event).await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await
    }
}

impl DynDocumentStore {
    /// Attempts to borrow the concrete backend behind the box.
    pub fn downcast_ref<B: StoreBackend + 'static>(&self) -> Option<&B> {
        DynStoreBackend::as_any(&*self.backend).downcast_ref::<B>()
    }

    /// Attempts to recover a typed store from the dynamic one.
    ///
    /// Returns `None` if the backend is not a `B`.
    pub fn into_static<B: StoreBackend + 'static>(self) -> Option<DocumentStore<B>> {
        DynStoreBackend::into_any(self.backend)
            .downcast::<B>()
            .ok()
            .map(|backend| DocumentStore::new(*backend))
    }
}

/// Conversion trait for converting a document store into a dynamic owned store.
pub trait IntoDynDocumentStore {
    /// Converts this store into a dynamic owned store.
    fn into_dyn(self) -> DynDocumentStore;
}

impl<B: StoreBackend + 'static> IntoDynDocumentStore for DocumentStore<B> {
    fn into_dyn(self) -> DynDocumentStore {
        DocumentStore::new(Box::new(self.backend))
    }
}

/// Blocking wrapper around a [`DocumentStore`].
///
/// Each call drives the handler to completion on the calling thread. Only use this with a
/// backend that does not need an async runtime to make progress, such as the filesystem
/// backend configured for synchronous I/O.
#[derive(Debug)]
pub struct BlockingDocumentStore<B: StoreBackend> {
    inner: DocumentStore<B>,
}

impl<B: StoreBackend> BlockingDocumentStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            inner: DocumentStore::new(backend),
        }
    }

    pub fn backend(&self) -> &B {
        self.inner.backend()
    }

    /// Returns the async store this wrapper drives.
    pub fn into_async(self) -> DocumentStore<B> {
        self.inner
    }

    pub fn dispatch(&self, kind: EventKind, event: &StoreEvent) -> StoreResult<EventOutcome> {
        block_on(self.inner.dispatch(kind, event))
    }

    pub fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        block_on(self.inner.create_collection(event))
    }

    pub fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        block_on(self.inner.insert(event))
    }

    pub fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        block_on(self.inner.update(event))
    }

    pub fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        block_on(self.inner.remove(event))
    }

    pub fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        block_on(self.inner.find(event))
    }

    pub fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        block_on(self.inner.find_one(event))
    }

    pub fn shutdown(self) -> StoreResult<()> {
        block_on(self.inner.shutdown())
    }
}

impl<B: StoreBackend> From<DocumentStore<B>> for BlockingDocumentStore<B> {
    fn from(inner: DocumentStore<B>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::decode_lines,
        error::StoreError,
        event::CollectionInfo,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records handler names and answers find-type events from a fixed file body.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingBackend {
        fn record(&self, name: &'static str) {
            self.calls.lock().unwrap().push(name);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StoreBackend for RecordingBackend {
        async fn create_collection(&self, _event: &StoreEvent) -> StoreResult<bool> {
            self.record("createCollection");
            Ok(true)
        }

        async fn insert(&self, _event: &StoreEvent) -> StoreResult<bool> {
            self.record("insert");
            Ok(true)
        }

        async fn save(&self, _event: &StoreEvent) -> StoreResult<bool> {
            Err(StoreError::not_implemented("save"))
        }

        async fn all(&self, _event: &StoreEvent) -> StoreResult<FindResult> {
            Err(StoreError::not_implemented("all"))
        }

        async fn find(&self, _event: &StoreEvent) -> StoreResult<FindResult> {
            self.record("find");
            decode_lines("{\"_id\":\"a\"}\n")
        }

        async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
            self.record("findOne");
            StoreBackend::find(self, event).await
        }

        async fn update(&self, _event: &StoreEvent) -> StoreResult<bool> {
            self.record("update");
            Ok(true)
        }

        async fn remove(&self, _event: &StoreEvent) -> StoreResult<bool> {
            self.record("remove");
            Ok(false)
        }

        async fn ensure_index(&self, _event: &StoreEvent) -> StoreResult<bool> {
            Err(StoreError::not_implemented("ensureIndex"))
        }

        async fn backup(&self, _event: &StoreEvent) -> StoreResult<bool> {
            Err(StoreError::not_implemented("backup"))
        }

        async fn backups(&self, _event: &StoreEvent) -> StoreResult<Vec<String>> {
            self.record("backups");
            Ok(vec!["nightly".to_string()])
        }

        async fn remove_backup(&self, _event: &StoreEvent) -> StoreResult<bool> {
            Err(StoreError::not_implemented("removeBackup"))
        }

        async fn restore(&self, _event: &StoreEvent) -> StoreResult<bool> {
            Err(StoreError::not_implemented("restore"))
        }
    }

    fn event() -> StoreEvent {
        StoreEvent::new(CollectionInfo::new("app", "users"))
    }

    #[tokio::test]
    async fn dispatch_routes_by_event_kind() {
        let store = DocumentStore::new(RecordingBackend::default());

        assert_eq!(
            store.dispatch(EventKind::CreateCollection, &event()).await.unwrap(),
            EventOutcome::Acknowledged(true)
        );
        assert_eq!(
            store.dispatch(EventKind::Remove, &event()).await.unwrap(),
            EventOutcome::Acknowledged(false)
        );
        assert_eq!(
            store.dispatch(EventKind::Backups, &event()).await.unwrap(),
            EventOutcome::Backups(vec!["nightly".to_string()])
        );

        match store.dispatch(EventKind::FindOne, &event()).await.unwrap() {
            EventOutcome::Found(result) => assert_eq!(result.indexes.get("a"), Some(&0)),
            other => panic!("unexpected outcome {other:?}"),
        }

        assert_eq!(
            store.backend().calls(),
            vec!["createCollection", "remove", "backups", "findOne", "find"]
        );
    }

    #[tokio::test]
    async fn dispatch_surfaces_not_implemented() {
        let store = DocumentStore::new(RecordingBackend::default());

        let err = store.dispatch(EventKind::Restore, &event()).await.unwrap_err();

        assert!(matches!(err, StoreError::NotImplemented(ref op) if op == "restore"));
    }

    #[tokio::test]
    async fn dyn_store_round_trips_to_static() {
        let store = DocumentStore::new(RecordingBackend::default()).into_dyn();

        assert!(store.insert(&event()).await.unwrap());
        assert_eq!(store.downcast_ref::<RecordingBackend>().unwrap().calls(), vec!["insert"]);

        let store = store.into_static::<RecordingBackend>().unwrap();
        assert_eq!(store.backend().calls(), vec!["insert"]);
    }

    #[tokio::test]
    async fn borrowed_backends_serve_events() {
        let mut backend = RecordingBackend::default();

        {
            let store = DocumentStore::new(&backend);
            assert!(store.create_collection(&event()).await.unwrap());
        }

        {
            let store = DocumentStore::new(&mut backend);
            assert!(store.update(&event()).await.unwrap());
            assert_eq!(
                store.dispatch(EventKind::Find, &event()).await.unwrap(),
                EventOutcome::Found(decode_lines("{\"_id\":\"a\"}\n").unwrap())
            );
        }

        assert_eq!(backend.calls(), vec!["createCollection", "update", "find"]);
    }

    #[test]
    fn blocking_store_runs_without_runtime() {
        let store = BlockingDocumentStore::new(RecordingBackend::default());

        assert!(store.update(&event()).unwrap());
        assert_eq!(store.find(&event()).unwrap().len(), 1);
        assert_eq!(
            store.dispatch(EventKind::Insert, &event()).unwrap(),
            EventOutcome::Acknowledged(true)
        );
        assert_eq!(store.backend().calls(), vec!["update", "find", "insert"]);

        store.shutdown().unwrap();
    }
}
