//! Filesystem helpers used by the store.
//!
//! Each helper has a blocking path (`std::fs`, runs on the calling thread) and an async path
//! (`tokio::fs`). Both produce the same effects on disk; [`IoMode`] picks one.

use std::{fs, io, path::Path};
use tracing::{debug, trace};

use filestash_core::error::{StoreError, StoreResult};

/// How the store talks to the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    /// Blocking calls that complete before the handler returns.
    Blocking,
    /// Async calls driven by the tokio runtime.
    Async,
}

impl IoMode {
    pub fn from_synchronous(synchronous: bool) -> Self {
        if synchronous {
            IoMode::Blocking
        } else {
            IoMode::Async
        }
    }
}

/// Creates a directory and any missing parents; an existing directory is not an error.
pub(crate) fn ensure_dir_sync(path: &Path) -> StoreResult<()> {
    fs::create_dir_all(path).map_err(|e| StoreError::from_io(e, path))
}

/// Reports whether `path` exists and is a regular file.
///
/// A missing file is `Ok(false)`. Any other failure to stat the path is an error.
pub(crate) async fn exists_file(mode: IoMode, path: &Path) -> StoreResult<bool> {
    let metadata = match mode {
        IoMode::Blocking => fs::metadata(path),
        IoMode::Async => tokio::fs::metadata(path).await,
    };

    match metadata {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "file doesn't exist");
            Ok(false)
        }
        Err(e) => Err(StoreError::from_io(e, path)),
    }
}

/// Reads a whole file as UTF-8 text.
pub(crate) async fn read_file(mode: IoMode, path: &Path) -> StoreResult<String> {
    let contents = match mode {
        IoMode::Blocking => fs::read_to_string(path),
        IoMode::Async => tokio::fs::read_to_string(path).await,
    }
    .map_err(|e| StoreError::from_io(e, path))?;

    trace!(path = %path.display(), bytes = contents.len(), "collection read from the file system");

    Ok(contents)
}

/// Replaces the contents of `path`, creating the file and its parent directory if needed.
pub(crate) async fn write_file(mode: IoMode, path: &Path, contents: &str) -> StoreResult<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());

    match mode {
        IoMode::Blocking => {
            if let Some(parent) = parent {
                fs::create_dir_all(parent).map_err(|e| StoreError::from_io(e, parent))?;
            }

            fs::write(path, contents).map_err(|e| StoreError::from_io(e, path))?;
        }
        IoMode::Async => {
            if let Some(parent) = parent {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::from_io(e, parent))?;
            }

            tokio::fs::write(path, contents)
                .await
                .map_err(|e| StoreError::from_io(e, path))?;
        }
    }

    trace!(path = %path.display(), bytes = contents.len(), "file written");

    Ok(())
}
