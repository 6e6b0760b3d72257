//! Filesystem storage backend for filestash.
//!
//! This crate persists each collection of a host document database to a file of
//! newline-delimited JSON documents under a configurable root directory.
//!
//! # Features
//!
//! - **One file per collection** - `{root_path}/{database}/{collection}.{extension}`
//! - **Blocking or async I/O** - `std::fs` on the calling thread, or `tokio::fs`
//! - **Serialized file access** - One async mutex per collection file
//! - **Injected logging** - Reports through a caller-supplied `tracing` dispatcher
//!
//! # Quick Start
//!
//! ```ignore
//! use filestash_core::{backend::StoreBackendBuilder, event::{CollectionInfo, StoreEvent}};
//! use filestash_fs::FileSystemStore;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileSystemStore::builder().root_path("db").build().await?;
//!     let users = CollectionInfo::new("app", "users")
//!         .with_docs(vec![json!({"_id": "1", "name": "Ann"})]);
//!
//!     store.insert(&StoreEvent::new(users.clone())).await?;
//!     let found = store.find(&StoreEvent::new(users)).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as filestash_fs;

pub mod files;
mod locks;
pub mod options;
pub mod store;

pub use files::IoMode;
pub use options::StoreOptions;
pub use store::{FileSystemStore, FileSystemStoreBuilder};
