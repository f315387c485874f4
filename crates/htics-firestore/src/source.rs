//! DocumentSource trait definition.
//!
//! A [`DocumentSource`] hands back the raw body of one `runQuery` call. The
//! export pipeline only depends on this trait, so tests can feed it canned
//! responses instead of talking to Firestore.

use std::future::Future;
use std::pin::Pin;

use crate::error::FetchResult;

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe so the pipeline can take
/// `&dyn DocumentSource`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can produce a `runQuery` response body.
///
/// # Example Implementation
///
/// ```ignore
/// struct Canned(Vec<u8>);
///
/// impl DocumentSource for Canned {
///     fn name(&self) -> &str { "canned" }
///
///     fn fetch(&self) -> BoxFuture<'_, FetchResult<Vec<u8>>> {
///         Box::pin(async move { Ok(self.0.clone()) })
///     }
/// }
/// ```
pub trait DocumentSource: Send + Sync {
    /// Short name used in logs (e.g. "firestore").
    fn name(&self) -> &str;

    /// Runs the query once and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` when the request fails, the server does not
    /// answer 200 OK, or the body cannot be read.
    fn fetch(&self) -> BoxFuture<'_, FetchResult<Vec<u8>>>;
}
