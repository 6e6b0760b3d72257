//! Convenient re-exports of commonly used types from filestash.
//!
//! ```ignore
//! use filestash::prelude::*;
//! ```
//!
//! This provides access to:
//! - Store fronts and the backend traits
//! - Event payloads, event kinds and outcomes
//! - Find results and error types

pub use filestash_core::{
    backend::{DynStoreBackend, StoreBackend, StoreBackendBuilder},
    document::FindResult,
    error::{StoreError, StoreResult},
    event::{CollectionInfo, EventKind, EventOutcome, StoreEvent},
    store::{BlockingDocumentStore, DocumentStore, DynDocumentStore, IntoDynDocumentStore},
};
