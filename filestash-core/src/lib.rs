//! Core traits and types for persisting a host document database through pluggable stores.
//!
//! A host keeps its collections in memory and raises one event per lifecycle moment
//! (collection creation, insert, update, remove, find). This crate defines the contract a
//! store backend fulfils to mirror those collections to durable storage:
//!
//! - **Events** ([`event`]) - The payload the host passes with every lifecycle event
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Document codec** ([`document`]) - Newline-delimited JSON encoding and the `_id` index
//! - **Document store** ([`store`]) - Front types that route events to a backend
//! - **Error handling** ([`error`]) - Error taxonomy and result type
//!
//! # Example
//!
//! ```ignore
//! use filestash_core::{event::{CollectionInfo, EventKind, StoreEvent}, store::DocumentStore};
//! use serde_json::json;
//!
//! let store = DocumentStore::new(backend);
//! let users = CollectionInfo::new("app", "users")
//!     .with_docs(vec![json!({"_id": "1", "name": "Ann"})]);
//!
//! store.dispatch(EventKind::Insert, &StoreEvent::new(users.clone())).await?;
//! let found = store.find(&StoreEvent::new(users)).await?;
//! assert_eq!(found.indexes["1"], 0);
//! ```

#[allow(unused_extern_crates)]
extern crate self as filestash_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod event;
pub mod store;
