//! Main filestash crate providing a unified interface for persisting host collections.
//!
//! This crate is the primary entry point for users of filestash. It re-exports the core
//! types from `filestash-core` and the filesystem backend from `filestash-fs`.
//!
//! # Features
//!
//! - **Event-driven persistence** - One handler per host lifecycle event
//! - **Filesystem backend** - One newline-delimited JSON file per collection
//! - **Blocking or async** - Async handlers, with a blocking front for hosts without a runtime
//! - **Explicit failures** - Unsupported events fail with `NotImplemented`
//!
//! # Quick Start
//!
//! ```ignore
//! use filestash::{prelude::*, fs::FileSystemStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create a filesystem backend rooted at ./db
//!     let store = DocumentStore::new(FileSystemStore::builder().build().await.unwrap());
//!
//!     // The host raises events carrying its in-memory view of a collection
//!     let users = CollectionInfo::new("app", "users")
//!         .with_docs(vec![json!({"_id": "1", "name": "Alice"})]);
//!
//!     store.create_collection(&StoreEvent::new(users.clone())).await.unwrap();
//!     store.insert(&StoreEvent::new(users.clone())).await.unwrap();
//!
//!     // Read the collection back
//!     let found = store.find(&StoreEvent::new(users)).await.unwrap();
//!     println!("Found users: {:?}", found.documents);
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dispatching by Event Name
//!
//! Hosts that emit events by name can route them through [`store::DocumentStore::dispatch`]:
//!
//! ```ignore
//! use filestash::prelude::*;
//!
//! let kind: EventKind = "findOne".parse()?;
//! match store.dispatch(kind, &event).await? {
//!     EventOutcome::Found(result) => println!("{} documents", result.len()),
//!     EventOutcome::Acknowledged(done) => println!("done: {done}"),
//!     EventOutcome::Backups(names) => println!("backups: {names:?}"),
//! }
//! ```
//!
//! # Blocking Hosts
//!
//! ```ignore
//! use filestash::{prelude::*, fs::FileSystemStore};
//!
//! let store = FileSystemStore::builder().root_path("data").build_blocking()?;
//! store.create_collection(&event)?;
//! let found = store.find(&event)?;
//! ```
//!
//! # Backends
//!
//! - [`fs`] - Filesystem storage, one file per collection

pub mod prelude;

pub use filestash_core::{backend, document, error, event, store};

// Re-export JSON types for convenience
pub use serde_json;

/// Filesystem storage backend.
pub mod fs {
    pub use filestash_fs::{FileSystemStore, FileSystemStoreBuilder, IoMode, StoreOptions};
}
