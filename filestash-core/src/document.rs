//! Document representation and the newline-delimited JSON codec.
//!
//! A collection file holds one compact JSON document per line. This module converts a list
//! of documents into that text and back, building the `_id` to line index map that hosts
//! use to locate documents in the returned list.

use serde::de::DeserializeOwned;
use serde_json::{Value, from_value};
use std::collections::HashMap;

use crate::error::{StoreError, StoreResult};

/// Name of the only document field a store inspects.
pub const ID_FIELD: &str = "_id";

/// Returns the key a document is indexed under.
///
/// A string `_id` is used as-is. Any other non-null `_id` is keyed by its compact JSON text,
/// so a numeric id `42` becomes `"42"`. Documents with no `_id` have no key.
pub fn document_key(document: &Value) -> Option<String> {
    match document.get(ID_FIELD)? {
        Value::Null => None,
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}

/// Serializes documents as newline-delimited JSON, one line per document.
///
/// Every line, including the last, is terminated with `\n`. An empty slice encodes to an
/// empty string.
pub fn encode_lines(documents: &[Value]) -> StoreResult<String> {
    let mut contents = String::new();

    for document in documents {
        contents.push_str(&serde_json::to_string(document)?);
        contents.push('\n');
    }

    Ok(contents)
}

/// Parses newline-delimited JSON into a [`FindResult`].
///
/// Blank lines are skipped. The index value recorded for a document is its physical line
/// number in `contents`, starting at zero.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`](crate::error::StoreError::Serialization) if a
/// non-blank line is not valid JSON.
pub fn decode_lines(contents: &str) -> StoreResult<FindResult> {
    let mut result = FindResult::default();

    for (line_number, line) in contents.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let document: Value = serde_json::from_str(line)?;

        if let Some(key) = document_key(&document) {
            result.indexes.insert(key, line_number);
        }

        result.documents.push(document);
    }

    Ok(result)
}

/// Documents read back from a collection file, with their `_id` index map.
///
/// `indexes` maps each document key to the line the document was read from. Because blank
/// lines are skipped, a line index is not necessarily the document's position in
/// `documents`; use [`FindResult::get`] to resolve an id to its document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindResult {
    pub documents: Vec<Value>,
    pub indexes: HashMap<String, usize>,
}

impl FindResult {
    /// Number of documents read.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Looks up a document by its key.
    ///
    /// The index only says whether the key was read; its values are line numbers, not
    /// positions in `documents`, so the document itself is found by scanning from the end.
    /// The last document carrying the key wins, matching the index.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.indexes.get(id)?;
        self.documents
            .iter()
            .rev()
            .find(|document| document_key(document).as_deref() == Some(id))
    }

    /// Converts every document into a typed record.
    ///
    /// # Errors
    ///
    /// Returns an error if any document does not match the shape of `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        self.documents
            .iter()
            .cloned()
            .map(|document| from_value(document).map_err(StoreError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn decode_builds_line_indexes() {
        let result = decode_lines("{\"_id\":\"a\"}\n{\"_id\":\"b\"}\n").unwrap();

        assert_eq!(result.documents, vec![json!({"_id": "a"}), json!({"_id": "b"})]);
        assert_eq!(result.indexes.get("a"), Some(&0));
        assert_eq!(result.indexes.get("b"), Some(&1));
        assert_eq!(result.indexes.len(), 2);
    }

    #[test]
    fn decode_skips_blank_lines() {
        let result = decode_lines("\n{\"_id\":\"a\"}\n\n   \n{\"_id\":\"b\"}\n\n").unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.indexes.get("a"), Some(&1));
        assert_eq!(result.indexes.get("b"), Some(&4));
    }

    #[test]
    fn decode_empty_file() {
        let result = decode_lines("").unwrap();

        assert!(result.is_empty());
        assert!(result.indexes.is_empty());
    }

    #[test]
    fn decode_accepts_missing_trailing_newline() {
        let result = decode_lines("{\"_id\":\"a\"}\n{\"_id\":\"b\"}").unwrap();

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn decode_rejects_malformed_line() {
        let err = decode_lines("{\"_id\":\"a\"}\nnot json\n").unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn documents_without_id_are_kept_but_not_indexed() {
        let result =
            decode_lines("{\"name\":\"anon\"}\n{\"_id\":7}\n{\"_id\":null}\n").unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.documents[2], json!({"_id": null}));
        assert_eq!(result.indexes.len(), 1);
        assert_eq!(result.indexes.get("7"), Some(&1));
        assert_eq!(result.get("null"), None);
    }

    #[test]
    fn duplicate_ids_index_the_last_line() {
        let result = decode_lines("{\"_id\":\"a\",\"v\":1}\n{\"_id\":\"a\",\"v\":2}\n").unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.indexes, HashMap::from([("a".to_string(), 1)]));
        assert_eq!(result.get("a"), Some(&json!({"_id": "a", "v": 2})));
    }

    #[test]
    fn encode_writes_one_line_per_document() {
        let contents = encode_lines(&[json!({"_id": "a", "n": 1}), json!({"_id": "b"})]).unwrap();

        assert_eq!(contents, "{\"_id\":\"a\",\"n\":1}\n{\"_id\":\"b\"}\n");
        assert_eq!(encode_lines(&[]).unwrap(), "");
    }

    #[test]
    fn get_resolves_through_index() {
        let result = decode_lines("\n{\"_id\":\"a\",\"v\":1}\n{\"_id\":\"b\",\"v\":2}\n").unwrap();

        assert_eq!(result.get("b"), Some(&json!({"_id": "b", "v": 2})));
        assert_eq!(result.get("missing"), None);
    }

    #[test]
    fn decode_into_typed_records() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Person {
            #[serde(rename = "_id")]
            id: String,
            name: String,
        }

        let result = decode_lines("{\"_id\":\"1111\",\"name\":\"John\"}\n").unwrap();
        let people: Vec<Person> = result.decode().unwrap();

        assert_eq!(
            people,
            vec![Person { id: "1111".into(), name: "John".into() }]
        );
    }
}
