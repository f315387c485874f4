//! HTTP client for the Firestore `runQuery` endpoint.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::FirestoreConfig;
use crate::error::{FetchError, FetchResult};
use crate::query::{RunQueryRequest, StructuredQuery};
use crate::source::{BoxFuture, DocumentSource};

/// Runs the schedule query against Firestore.
pub struct FirestoreClient {
    client: Client,
    config: FirestoreConfig,
    endpoint: Url,
}

impl FirestoreClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL cannot be formed or the HTTP
    /// client cannot be built.
    pub fn new(config: FirestoreConfig) -> FetchResult<Self> {
        let endpoint = config.run_query_url().map_err(|e| {
            FetchError::Config(format!(
                "invalid runQuery URL for project {:?} and parent {:?}: {e}",
                config.project, config.parent
            ))
        })?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Returns the `runQuery` URL this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    /// Builds the JSON request body for the configured collection.
    pub fn request_body(&self) -> FetchResult<String> {
        let request =
            RunQueryRequest::new(StructuredQuery::events_by_begin_desc(&self.config.collection));
        Ok(request.to_body()?)
    }

    /// Posts the query and returns the raw response body.
    pub async fn run_query(&self) -> FetchResult<Vec<u8>> {
        let body = self.request_body()?;

        trace!(url = %self.endpoint, body = %body, "Sending runQuery request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| FetchError::transport(self.endpoint.as_str(), e))?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> FetchResult<Vec<u8>> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Unexpected response status");
            return Err(FetchError::status(self.endpoint.as_str(), status, body));
        }

        let bytes = response.bytes().await.map_err(FetchError::BodyRead)?;
        debug!(bytes = bytes.len(), "Read runQuery response");
        Ok(bytes.to_vec())
    }
}

impl DocumentSource for FirestoreClient {
    fn name(&self) -> &str {
        "firestore"
    }

    fn fetch(&self) -> BoxFuture<'_, FetchResult<Vec<u8>>> {
        Box::pin(self.run_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchErrorKind;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::time::Duration;

    /// Serves one canned HTTP response and hands back the raw request text.
    fn serve_once(response: &'static str) -> (SocketAddr, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            let _ = tx.send(request);
        });

        (addr, rx)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn local_client(addr: SocketAddr) -> FirestoreClient {
        let config = FirestoreConfig::new(format!("http://{addr}/v1/"))
            .unwrap()
            .with_timeout(Duration::from_secs(10));
        FirestoreClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn non_ok_status_is_status_error() {
        let (addr, _request) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
        );

        let err = local_client(addr).fetch().await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Status);
        match &err {
            FetchError::Status { status, body, .. } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn ok_status_returns_raw_body() {
        let (addr, request) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        );

        let body = local_client(addr).fetch().await.unwrap();
        assert_eq!(body, b"[]");

        let request = request.recv().unwrap();
        assert!(request.starts_with(
            "POST /v1/projects/junctor-hackertracker/databases/(default)/documents/conferences/MOCA2024:runQuery HTTP/1.1"
        ));
        assert!(request.contains("\"structuredQuery\""));
        assert!(request.contains("\"begin_timestamp\""));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let err = local_client(addr).fetch().await.unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Transport);
    }

    #[test]
    fn client_creation() {
        let config = FirestoreConfig::default().with_timeout(Duration::from_secs(10));
        let client = FirestoreClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn client_endpoint() {
        let client = FirestoreClient::new(FirestoreConfig::default()).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://firestore.googleapis.com/v1/projects/junctor-hackertracker/databases/(default)/documents/conferences/MOCA2024:runQuery"
        );
        assert_eq!(client.name(), "firestore");
    }

    #[test]
    fn request_body_uses_configured_collection() {
        let client =
            FirestoreClient::new(FirestoreConfig::default().with_collection("talks")).unwrap();
        let body: serde_json::Value = serde_json::from_str(&client.request_body().unwrap()).unwrap();
        assert_eq!(
            body["structuredQuery"]["from"][0]["collectionId"],
            serde_json::json!("talks")
        );
    }
}
