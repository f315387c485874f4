//! Firestore `runQuery` client and the [`DocumentSource`] seam.
//!
//! - [`FirestoreConfig`] - endpoint, project, parent path and collection
//! - [`StructuredQuery`] - serde model of the query body
//! - [`FirestoreClient`] - posts the query and returns the raw body
//! - [`FetchError`] - transport, status and body-read failures
//!
//! ```ignore
//! use htics_firestore::{DocumentSource, FirestoreClient, FirestoreConfig};
//!
//! let client = FirestoreClient::new(FirestoreConfig::default())?;
//! let body = client.fetch().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod source;

pub use client::FirestoreClient;
pub use config::FirestoreConfig;
pub use error::{FetchError, FetchErrorKind, FetchResult};
pub use query::{
    CollectionSelector, Direction, FieldReference, Order, RunQueryRequest, StructuredQuery,
};
pub use source::{BoxFuture, DocumentSource};
