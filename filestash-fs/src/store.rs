//! Filesystem implementation of the store backend.
//!
//! Each collection lives in its own file of newline-delimited JSON documents:
//!
//! ```text
//! <root_path>/
//! └── <database>/
//!     ├── <collection>.<file_extension>
//!     └── ...
//! ```
//!
//! Writes replace the whole file with the collection as the host holds it; reads re-parse
//! the whole file. Nothing is cached between calls.

use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{Dispatch, debug, error, instrument::WithSubscriber};

use filestash_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{FindResult, decode_lines, encode_lines},
    error::{StoreError, StoreResult},
    event::StoreEvent,
    store::BlockingDocumentStore,
};

use crate::{
    files::{self, IoMode},
    locks::PathLocks,
    options::StoreOptions,
};

/// Filesystem-backed document store.
///
/// `FileSystemStore` is cloneable; clones share the same per-path locks, so overlapping
/// handlers on one collection file run one after the other even across clones.
///
/// # Example
///
/// ```ignore
/// use filestash_fs::FileSystemStore;
/// use filestash_core::{backend::StoreBackend, event::{CollectionInfo, StoreEvent}};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileSystemStore::builder().root_path("data").build().await?;
///
///     let users = CollectionInfo::new("app", "users")
///         .with_docs(vec![json!({"_id": "1", "name": "Ann"})]);
///
///     store.create_collection(&StoreEvent::new(users.clone())).await?;
///     store.insert(&StoreEvent::new(users.clone())).await?;
///
///     let found = store.find(&StoreEvent::new(users)).await?;
///     assert_eq!(found.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    options: Arc<StoreOptions>,
    logger: Dispatch,
    locks: Arc<PathLocks>,
}

impl FileSystemStore {
    /// Creates a store and makes sure its root directory exists.
    ///
    /// The root directory is created synchronously, together with any missing parents. An
    /// existing directory is reused.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the root directory cannot be created.
    pub fn new(options: StoreOptions) -> StoreResult<Self> {
        let logger = options.logger.clone().unwrap_or_else(Dispatch::none);

        tracing::dispatcher::with_default(&logger, || {
            debug!(root_path = %options.root_path.display(), "database will be in this folder");

            files::ensure_dir_sync(&options.root_path).inspect_err(|e| {
                error!(error = %e, "cannot create the database directory");
            })?;

            debug!(root_path = %options.root_path.display(), "directory ready");

            Ok::<_, StoreError>(())
        })?;

        Ok(Self {
            options: Arc::new(options),
            logger,
            locks: Arc::new(PathLocks::new()),
        })
    }

    /// Creates a builder for constructing a `FileSystemStore`.
    pub fn builder() -> FileSystemStoreBuilder {
        FileSystemStoreBuilder::default()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn io_mode(&self) -> IoMode {
        IoMode::from_synchronous(self.options.synchronous)
    }

    /// Returns the path of a collection file.
    ///
    /// The path is `{root_path}/{database}/{collection}.{file_extension}`. No I/O is done.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if either name is empty, is `.` or `..`, or
    /// contains a path separator.
    pub fn collection_path(&self, database: &str, collection: &str) -> StoreResult<PathBuf> {
        if database.is_empty() {
            return Err(StoreError::InvalidArgument("Parameter 'ddbb_name' is required".into()));
        }
        if collection.is_empty() {
            return Err(StoreError::InvalidArgument("Parameter 'coll_name' is required".into()));
        }
        check_path_segment("ddbb_name", database)?;
        check_path_segment("coll_name", collection)?;

        Ok(self
            .options
            .root_path
            .join(database)
            .join(format!("{collection}.{}", self.options.file_extension)))
    }

    fn event_path(&self, event: &StoreEvent) -> StoreResult<PathBuf> {
        self.collection_path(event.collection.database_name(), &event.collection.name)
    }

    async fn persist(&self, path: &Path, documents: &[serde_json::Value]) -> StoreResult<bool> {
        let contents = encode_lines(documents)?;
        let lock = self.locks.for_path(path).await;
        let _guard = lock.lock().await;

        match files::write_file(self.io_mode(), path, &contents).await {
            Ok(()) => {
                debug!(path = %path.display(), count = documents.len(), "documents persisted in the file system");
                Ok(true)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "documents not persisted in the file system");
                Err(e)
            }
        }
    }

    async fn load(&self, path: &Path) -> StoreResult<FindResult> {
        let contents = {
            let lock = self.locks.for_path(path).await;
            let _guard = lock.lock().await;

            files::read_file(self.io_mode(), path).await?
        };

        let result = decode_lines(&contents)?;
        debug!(path = %path.display(), count = result.len(), "collection read from the file system");

        Ok(result)
    }

    async fn create(&self, event: &StoreEvent) -> StoreResult<bool> {
        let path = self.event_path(event)?;
        let lock = self.locks.for_path(&path).await;
        let _guard = lock.lock().await;

        if files::exists_file(self.io_mode(), &path).await? {
            debug!(path = %path.display(), "collection file already exists");
            return Ok(true);
        }

        files::write_file(self.io_mode(), &path, "").await?;
        debug!(path = %path.display(), "collection file created");

        Ok(true)
    }

    fn unsupported<T>(&self, operation: &str) -> StoreResult<T> {
        tracing::dispatcher::with_default(&self.logger, || {
            debug!("#{operation}");
        });

        Err(StoreError::not_implemented(operation))
    }
}

/// Names become single path components below the root.
fn check_path_segment(parameter: &str, name: &str) -> StoreResult<()> {
    if name == "." || name == ".." || name.chars().any(std::path::is_separator) {
        return Err(StoreError::InvalidArgument(format!(
            "Parameter '{parameter}' must be a plain name, got {name:?}"
        )));
    }

    Ok(())
}

#[async_trait]
impl StoreBackend for FileSystemStore {
    async fn create_collection(&self, event: &StoreEvent) -> StoreResult<bool> {
        async {
            debug!("#createCollection");
            self.create(event).await
        }
        .with_subscriber(self.logger.clone())
        .await
    }

    async fn insert(&self, event: &StoreEvent) -> StoreResult<bool> {
        async {
            debug!("#insert");
            self.persist(&self.event_path(event)?, &event.collection.docs).await
        }
        .with_subscriber(self.logger.clone())
        .await
    }

    async fn save(&self, _event: &StoreEvent) -> StoreResult<bool> {
        self.unsupported("save")
    }

    async fn all(&self, _event: &StoreEvent) -> StoreResult<FindResult> {
        self.unsupported("all")
    }

    async fn find(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        async {
            debug!("#find");
            self.load(&self.event_path(event)?).await
        }
        .with_subscriber(self.logger.clone())
        .await
    }

    async fn find_one(&self, event: &StoreEvent) -> StoreResult<FindResult> {
        // TODO: scan line by line and stop at the first match once selectors reach the store.
        async {
            debug!("#findOne");
            self.load(&self.event_path(event)?).await
        }
        .with_subscriber(self.logger.clone())
        .await
    }

    async fn update(&self, event: &StoreEvent) -> StoreResult<bool> {
        async {
            debug!("#update");
            self.persist(&self.event_path(event)?, &event.collection.docs).await
        }
        .with_subscriber(self.logger.clone())
        .await
    }

    async fn remove(&self, event: &StoreEvent) -> StoreResult<bool> {
        async {
            debug!("#remove");
            self.persist(&self.event_path(event)?, &event.collection.docs).await
        }
        .with_subscriber(self.logger.clone())
        .await
    }

    async fn ensure_index(&self, _event: &StoreEvent) -> StoreResult<bool> {
        self.unsupported("ensureIndex")
    }

    async fn backup(&self, _event: &StoreEvent) -> StoreResult<bool> {
        self.unsupported("backup")
    }

    async fn backups(&self, _event: &StoreEvent) -> StoreResult<Vec<String>> {
        self.unsupported("backups")
    }

    async fn remove_backup(&self, _event: &StoreEvent) -> StoreResult<bool> {
        self.unsupported("removeBackup")
    }

    async fn restore(&self, _event: &StoreEvent) -> StoreResult<bool> {
        self.unsupported("restore")
    }
}

/// Builder for constructing [`FileSystemStore`] instances.
///
/// # Example
///
/// ```ignore
/// use filestash_fs::FileSystemStore;
/// use filestash_core::backend::StoreBackendBuilder;
///
/// let store = FileSystemStore::builder()
///     .root_path("data")
///     .file_extension("ndjson")
///     .build()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct FileSystemStoreBuilder {
    options: StoreOptions,
}

impl FileSystemStoreBuilder {
    /// Replaces every option at once, typically with parsed host configuration.
    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root_path(mut self, root_path: impl Into<PathBuf>) -> Self {
        self.options.root_path = root_path.into();
        self
    }

    pub fn file_extension(mut self, file_extension: impl Into<String>) -> Self {
        self.options.file_extension = file_extension.into();
        self
    }

    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.options.synchronous = synchronous;
        self
    }

    /// Sets the logger the store reports to.
    pub fn logger(mut self, logger: impl Into<Dispatch>) -> Self {
        self.options.logger = Some(logger.into());
        self
    }

    /// Builds a store with blocking I/O behind a blocking front.
    ///
    /// Forces `synchronous`, so the returned store never needs an async runtime.
    pub fn build_blocking(mut self) -> StoreResult<BlockingDocumentStore<FileSystemStore>> {
        self.options.synchronous = true;

        Ok(BlockingDocumentStore::new(FileSystemStore::new(self.options)?))
    }
}

#[async_trait]
impl StoreBackendBuilder for FileSystemStoreBuilder {
    type Backend = FileSystemStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        FileSystemStore::new(self.options)
    }
}
