//! Structured query bodies for `:runQuery`.

use serde::Serialize;

/// Field the schedule is ordered by.
pub const BEGIN_TIMESTAMP_FIELD: &str = "begin_timestamp";

/// Pseudo-field naming the document itself.
pub const DOCUMENT_NAME_FIELD: &str = "__name__";

/// Body of a `:runQuery` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    pub structured_query: StructuredQuery,
}

impl RunQueryRequest {
    /// Wraps a structured query.
    pub fn new(structured_query: StructuredQuery) -> Self {
        Self { structured_query }
    }

    /// Serializes the request as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A Firestore structured query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
}

impl StructuredQuery {
    /// All documents of `collection`, latest first, ties broken by document
    /// name (also descending).
    pub fn events_by_begin_desc(collection: impl Into<String>) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection.into(),
            }],
            order_by: vec![
                Order::new(BEGIN_TIMESTAMP_FIELD, Direction::Descending),
                Order::new(DOCUMENT_NAME_FIELD, Direction::Descending),
            ],
        }
    }
}

/// Collection to query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

/// One ordering clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: Direction,
}

impl Order {
    /// Orders by `field_path` in the given direction.
    pub fn new(field_path: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: FieldReference {
                field_path: field_path.into(),
            },
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Ascending,
    Descending,
}
