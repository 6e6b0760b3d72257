//! Lifecycle events raised by the host document database.
//!
//! The host calls into a store once per lifecycle moment (collection creation, insert,
//! update, remove, find, ...). Each call carries a [`StoreEvent`] describing the target
//! collection as the host currently holds it in memory. Handlers read from the event but
//! never write back into it; find-type handlers return their results instead.
//!
//! # Example
//!
//! ```ignore
//! use filestash_core::event::{CollectionInfo, EventKind, StoreEvent};
//! use serde_json::json;
//!
//! let event = StoreEvent::new(
//!     CollectionInfo::new("app", "users").with_docs(vec![json!({"_id": "1", "name": "Ann"})]),
//! );
//! let kind: EventKind = "insert".parse()?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt, str::FromStr};

use crate::{
    document::FindResult,
    error::{StoreError, StoreResult},
};

/// The host's in-memory view of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name, without the database prefix.
    pub name: String,
    /// Qualified name in the form `database.collection`.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Every document of the collection, already mutated by the host for write events.
    #[serde(default)]
    pub docs: Vec<Value>,
    /// Host-side map from document key to position.
    #[serde(default)]
    pub doc_indexes: HashMap<String, usize>,
}

impl CollectionInfo {
    /// Creates an empty collection view for `database.name`.
    pub fn new(database: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: format!("{database}.{name}"),
            ..Default::default()
        }
    }

    /// Replaces the collection's documents.
    pub fn with_docs(mut self, docs: Vec<Value>) -> Self {
        self.docs = docs;
        self
    }

    /// Returns the database segment of the qualified name.
    pub fn database_name(&self) -> &str {
        self.full_name
            .split('.')
            .next()
            .unwrap_or_default()
    }

    /// Overwrites `docs` and `doc_indexes` with a find result.
    ///
    /// Stores never call this themselves; hosts that keep the collection view as their
    /// working copy can use it after a find.
    pub fn apply(&mut self, result: &FindResult) {
        self.docs = result.documents.clone();
        self.doc_indexes = result.indexes.clone();
    }
}

/// Payload passed by the host with every event.
///
/// Only `collection` is read by the filesystem store. The remaining fields describe the
/// operation that produced the event and are carried for backends that want them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreEvent {
    pub collection: CollectionInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl StoreEvent {
    pub fn new(collection: CollectionInfo) -> Self {
        Self {
            collection,
            ..Default::default()
        }
    }

    pub fn with_doc(mut self, doc: Value) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn with_selector(mut self, selector: Value) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn with_modifier(mut self, modifier: Value) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Every lifecycle event a host may raise, named as the host names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CreateCollection,
    Insert,
    Save,
    All,
    Find,
    FindOne,
    Update,
    Remove,
    EnsureIndex,
    Backup,
    Backups,
    RemoveBackup,
    Restore,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::CreateCollection,
        EventKind::Insert,
        EventKind::Save,
        EventKind::All,
        EventKind::Find,
        EventKind::FindOne,
        EventKind::Update,
        EventKind::Remove,
        EventKind::EnsureIndex,
        EventKind::Backup,
        EventKind::Backups,
        EventKind::RemoveBackup,
        EventKind::Restore,
    ];

    /// The host-side event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CreateCollection => "createCollection",
            EventKind::Insert => "insert",
            EventKind::Save => "save",
            EventKind::All => "all",
            EventKind::Find => "find",
            EventKind::FindOne => "findOne",
            EventKind::Update => "update",
            EventKind::Remove => "remove",
            EventKind::EnsureIndex => "ensureIndex",
            EventKind::Backup => "backup",
            EventKind::Backups => "backups",
            EventKind::RemoveBackup => "removeBackup",
            EventKind::Restore => "restore",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StoreError::InvalidArgument(format!("Unknown event '{s}'")))
    }
}

/// What a handler produced for a dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// A write or collection event completed; the flag is the handler's result.
    Acknowledged(bool),
    /// A read event produced documents.
    Found(FindResult),
    /// Names of the available backups.
    Backups(Vec<String>),
}
