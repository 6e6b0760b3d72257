//! Storage backend abstraction for host lifecycle events.
//!
//! This module defines the traits a persistence backend implements to receive events from
//! a host document database. The host keeps the authoritative documents in memory and
//! raises one event per lifecycle moment; the backend mirrors them to durable storage and
//! reads them back on demand.
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides one async handler per event. Implementations are
//! required to be thread-safe (`Send + Sync`). Handlers that the backend cannot honour
//! must fail with [`StoreError::NotImplemented`](crate::error::StoreError::NotImplemented)
//! rather than silently succeeding.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use filestash_core::{backend::StoreBackend, event::{CollectionInfo, StoreEvent}};
//! use serde_json::json;
//!
//! let event = StoreEvent::new(
//!     CollectionInfo::new("app", "users").with_docs(vec![json!({"_id": "1"})]),
//! );
//! backend.insert(&event).await?;
//! let found = backend.find(&event).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{any::Any, fmt::Debug};

use crate::{document::FindResult, error::StoreResult, event::StoreEvent};

/// Abstract interface for event-driven persistence backends.
///
/// # Write Semantics
///
/// `insert`, `update` and `remove` receive the collection's full document list as the host
/// holds it after applying the operation. Backends persist that list; they do not interpret
/// the event's `doc`, `selector` or `modifier`.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). Errors are surfaced to
/// the caller and never retried by the backend.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Ensures durable storage exists for the event's collection.
    ///
    /// Idempotent: returns `Ok(true)` whether the storage already existed or was created.
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Persists the collection after documents were inserted.
    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Persists the collection after documents were saved (insert or replace).
    async fn save(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Reads every document of every collection known to the backend.
    async fn all(&self, event: &StoreEvent) -> StoreResult<FindResult>;

    /// Reads the collection's documents and their `_id` index map.
    ///
    /// Selection is left to the host; the event's `selector` and `fields` are advisory.
    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult>;

    /// Reads the collection for a single-document lookup.
    ///
    /// Backends without per-document access may return the whole collection, leaving the
    /// match to the host.
    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult>;

    /// Persists the collection after documents were updated.
    async fn update(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Persists the collection after documents were removed.
    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Creates an index described by the event.
    async fn ensure_index(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Takes a backup of the store.
    async fn backup(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Lists the names of the available backups.
    async fn backups(&self, event: &StoreEvent) -> StoreResult<Vec<String>>;

    /// Deletes a backup.
    async fn remove_backup(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Restores the store from a backup.
    async fn restore(&self, event: &StoreEvent) -> StoreResult<bool>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::create_collection(*self, event).await
    }

    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::insert(*self, event).await
    }

    async fn save(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::save(*self, event).await
    }

    async fn all(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        <B as StoreBackend>::all(*self, event).await
    }

    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        <B as StoreBackend>::find(*self, event).await
    }

    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        <B as StoreBackend>::find_one(*self, event).await
    }

    async fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::update(*self, event).await
    }

    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::remove(*self, event).await
    }

    async fn ensure_index(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::ensure_index(*self, event).await
    }

    async fn backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::backup(*self, event).await
    }

    async fn backups(&self, event: &StoreEvent) -> StoreResult<Vec<String>> {
        <B as StoreBackend>::backups(*self, event).await
    }

    async fn remove_backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::remove_backup(*self, event).await
    }

    async fn restore(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::restore(*self, event).await
    }
}

#[async_trait]
impl<B> StoreBackend for &mut B
where
    B: StoreBackend,
{
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::create_collection(&**self, event).await
    }

    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::insert(&**self, event).await
    }

    async fn save(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::save(&**self, event).await
    }

    async fn all(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        <B as StoreBackend>::all(&**self, event).await
    }

    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        <B as StoreBackend>::find(&**self, event).await
    }

    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        <B as StoreBackend>::find_one(&**self, event).await
    }

    async fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::update(&**self, event).await
    }

    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::remove(&**self, event).await
    }

    async fn ensure_index(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::ensure_index(&**self, event).await
    }

    async fn backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::backup(&**self, event).await
    }

    async fn backups(&self, event: &StoreEvent) -> StoreResult<Vec<String>> {
        <B as StoreBackend>::backups(&**self, event).await
    }

    async fn remove_backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::remove_backup(&**self, event).await
    }

    async fn restore(&self, event: &StoreEvent) -> StoreResult<bool> {
        <B as StoreBackend>::restore(&**self, event).await
    }
}

#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn save(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn all(&self, event: &StoreEvent) -> StoreResult<FindResult>;
    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult>;
    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult>;
    async fn update(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn ensure_index(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn backup(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn backups(&self, event: &StoreEvent) -> StoreResult<Vec<String>>;
    async fn remove_backup(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn restore(&self, event: &StoreEvent) -> StoreResult<bool>;
    async fn shutdown_boxed(self: Box<Self>) -> StoreResult<()>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

#[async_trait]
impl<B: StoreBackend + Send + Sync + 'static> DynStoreBackend for B {
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::create_collection(self, event).await
    }

    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::insert(self, event).await
    }

    async fn save(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::save(self, event).await
    }

    async fn all(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        StoreBackend::all(self, event).await
    }

    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        StoreBackend::find(self, event).await
    }

    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        StoreBackend::find_one(self, event).await
    }

    async fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::update(self, event).await
    }

    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::remove(self, event).await
    }

    async fn ensure_index(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::ensure_index(self, event).await
    }

    async fn backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::backup(self, event).await
    }

    async fn backups(&self, event: &StoreEvent) -> StoreResult<Vec<String>> {
        StoreBackend::backups(self, event).await
    }

    async fn remove_backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::remove_backup(self, event).await
    }

    async fn restore(&self, event: &StoreEvent) -> StoreResult<bool> {
        StoreBackend::restore(self, event).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> StoreResult<()> {
        StoreBackend::shutdown(*self).await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[async_trait]
impl StoreBackend for Box<dyn DynStoreBackend> {
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::create_collection(&**self, event).await
    }

    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::insert(&**self, event).await
    }

    async fn save(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::save(&**self, event).await
    }

    async fn all(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        DynStoreBackend::all(&**self, event).await
    }

    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        DynStoreBackend::find(&**self, event).await
    }

    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        DynStoreBackend::find_one(&**self, event).await
    }

    async fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::update(&**self, event).await
    }

    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::remove(&**self, event).await
    }

    async fn ensure_index(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::ensure_index(&**self, event).await
    }

    async fn backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::backup(&**self, event).await
    }

    async fn backups(&self, event: &StoreEvent) -> StoreResult<Vec<String>> {
        DynStoreBackend::backups(&**self, event).await
    }

    async fn remove_backup(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::remove_backup(&**self, event).await
    }

    async fn restore(&self, event: &StoreEvent) -> StoreResult<bool> {
        DynStoreBackend::restore(&**self, event).await
    }

    async fn shutdown(self) -> StoreResult<()> {
        DynStoreBackend::shutdown_boxed(self).await
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
