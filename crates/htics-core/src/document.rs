//! Firestore `runQuery` response documents.
//!
//! A `runQuery` response is a JSON array. Each element usually wraps one
//! [`Document`]; Firestore also emits elements carrying only a `readTime`
//! (for example when the query matched nothing), which hold no document.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, trace};

use crate::value::{TypedValue, lookup};

/// A single Firestore document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name of the document.
    #[serde(default)]
    pub name: String,
    /// Top-level fields.
    #[serde(default)]
    pub fields: BTreeMap<String, TypedValue>,
    /// Creation time as reported by Firestore.
    pub create_time: Option<String>,
    /// Last update time as reported by Firestore.
    pub update_time: Option<String>,
}

impl Document {
    /// Creates a document from a name and its fields.
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, TypedValue>) -> Self {
        Self {
            name: name.into(),
            fields,
            create_time: None,
            update_time: None,
        }
    }

    /// Looks up a dotted field path (`"location.name"`).
    pub fn field(&self, path: &str) -> Option<&TypedValue> {
        lookup(&self.fields, path)
    }
}

/// One element of a `runQuery` response array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponseItem {
    /// The matched document, absent on read-time-only elements.
    pub document: Option<Document>,
    /// Time at which the document was read.
    pub read_time: Option<String>,
}

/// Parses a raw `runQuery` response body into its documents, in order.
///
/// # Errors
///
/// Returns an error if the body is not a JSON array of response elements.
pub fn parse_query_response(body: &[u8]) -> Result<Vec<Document>, serde_json::Error> {
    let items: Vec<QueryResponseItem> = serde_json::from_slice(body)?;
    trace!(items = items.len(), "Parsed query response");

    let documents: Vec<Document> = items
        .into_iter()
        .filter_map(|item| {
            if item.document.is_none() {
                debug!(read_time = ?item.read_time, "Skipping response element without document");
            }
            item.document
        })
        .collect();

    debug!(documents = documents.len(), "Extracted documents from query response");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_documents_in_order() {
        let body = br#"[
            {"document": {"name": "projects/p/databases/(default)/documents/events/2", "fields": {"title": {"stringValue": "Second"}}}, "readTime": "2024-09-12T14:00:00Z"},
            {"document": {"name": "projects/p/databases/(default)/documents/events/1", "fields": {"title": {"stringValue": "First"}}}, "readTime": "2024-09-12T14:00:00Z"}
        ]"#;

        let documents = parse_query_response(body).unwrap();
        assert_eq!(documents.len(), 2);
        assert!(documents[0].name.ends_with("events/2"));
        assert_eq!(
            documents[1].field("title").and_then(TypedValue::as_text),
            Some("First")
        );
    }

    #[test]
    fn skips_read_time_only_elements() {
        let body = br#"[{"readTime": "2024-09-12T14:00:00.000000Z"}]"#;
        assert!(parse_query_response(body).unwrap().is_empty());
    }

    #[test]
    fn empty_array_yields_no_documents() {
        assert!(parse_query_response(b"[]").unwrap().is_empty());
    }

    #[test]
    fn document_without_fields_has_empty_map() {
        let body = br#"[{"document": {"name": "events/empty"}}]"#;
        let documents = parse_query_response(body).unwrap();
        assert!(documents[0].fields.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_query_response(b"{not json").is_err());
        assert!(parse_query_response(br#"{"document": {}}"#).is_err());
    }
}
