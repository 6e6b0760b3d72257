//! Configuration for the filesystem store.

use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::Dispatch;

use filestash_core::error::{StoreError, StoreResult};

pub const DEFAULT_ROOT_PATH: &str = "db";
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// Options of a [`FileSystemStore`](crate::FileSystemStore).
///
/// Any option left out of a host configuration keeps its default, so a partial
/// configuration overlays the defaults:
///
/// | option           | default |
/// |------------------|---------|
/// | `root_path`      | `"db"`  |
/// | `file_extension` | `"json"`|
/// | `synchronous`    | `false` |
///
/// The older option names `ddbb_path`, `collection_extension` and `sync` are accepted as
/// aliases.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Directory that holds one sub-directory per database.
    #[serde(alias = "ddbb_path")]
    pub root_path: PathBuf,
    /// Extension of collection files, without the leading dot.
    #[serde(alias = "collection_extension")]
    pub file_extension: String,
    /// Perform blocking filesystem calls on the calling thread instead of async I/O.
    #[serde(alias = "sync")]
    pub synchronous: bool,
    /// Logger the store reports to. `None` discards all store logging.
    #[serde(skip)]
    pub logger: Option<Dispatch>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_ROOT_PATH),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            synchronous: false,
            logger: None,
        }
    }
}

impl StoreOptions {
    /// Parses a host configuration object.
    ///
    /// `null` yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if the value is not an object or an option has
    /// the wrong type.
    pub fn from_json(value: Value) -> StoreResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| StoreError::InvalidArgument(format!("Invalid store options: {e}"))),
            other => Err(StoreError::InvalidArgument(format!(
                "Store options must be an object, got {other}"
            ))),
        }
    }

    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = Some(logger);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let options = StoreOptions::default();

        assert_eq!(options.root_path, PathBuf::from("db"));
        assert_eq!(options.file_extension, "json");
        assert!(!options.synchronous);
        assert!(options.logger.is_none());
    }

    #[test]
    fn partial_configuration_overlays_defaults() {
        let options = StoreOptions::from_json(json!({ "root_path": "data" })).unwrap();

        assert_eq!(options.root_path, PathBuf::from("data"));
        assert_eq!(options.file_extension, "json");
        assert!(!options.synchronous);
    }

    #[test]
    fn legacy_option_names() {
        let options = StoreOptions::from_json(json!({
            "ddbb_path": "data",
            "collection_extension": "ndjson",
            "sync": true
        }))
        .unwrap();

        assert_eq!(options.root_path, PathBuf::from("data"));
        assert_eq!(options.file_extension, "ndjson");
        assert!(options.synchronous);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(StoreOptions::from_json(Value::Null).is_ok());
        assert!(matches!(
            StoreOptions::from_json(json!("db")),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            StoreOptions::from_json(json!({ "synchronous": "yes" })),
            Err(StoreError::InvalidArgument(_))
        ));
    }
}
