//! Per-path serialization of collection file access.
//!
//! A collection write replaces the whole file, so two overlapping writes to the same path
//! could interleave and leave a mix of both. Every access to a collection file holds the
//! mutex registered for that path.

use mea::mutex::Mutex;
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

type PathLock = Arc<Mutex<()>>;

/// Registry of one async mutex per collection path.
///
/// Entries are created on first use and kept for the life of the store; there is one per
/// collection file the store has touched.
pub(crate) struct PathLocks {
    locks: Mutex<HashMap<PathBuf, PathLock>>,
}

impl PathLocks {
    pub(crate) fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the mutex guarding `path`, registering it if needed.
    pub(crate) async fn for_path(&self, path: &Path) -> PathLock {
        self.locks
            .lock()
            .await
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

impl fmt::Debug for PathLocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathLocks").finish_non_exhaustive()
    }
}
