//! Firestore endpoint configuration.

use std::time::Duration;

use url::Url;

/// Where and how to query the schedule documents.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Base URL of the Firestore REST API, always ending in `/`.
    pub base_url: Url,

    /// Google Cloud project id.
    pub project: String,

    /// Database id.
    pub database: String,

    /// Parent document path the query runs under (e.g. `conferences/MOCA2024`).
    pub parent: String,

    /// Collection holding the event documents.
    pub collection: String,

    /// Request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl FirestoreConfig {
    /// Default REST API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://firestore.googleapis.com/v1/";

    /// Default project.
    pub const DEFAULT_PROJECT: &'static str = "junctor-hackertracker";

    /// Default database.
    pub const DEFAULT_DATABASE: &'static str = "(default)";

    /// Default conference code.
    pub const DEFAULT_CONFERENCE: &'static str = "MOCA2024";

    /// Default event collection.
    pub const DEFAULT_COLLECTION: &'static str = "events";

    /// Creates a configuration for the given API base URL, with every other
    /// setting at its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let mut parsed = Url::parse(base_url.as_ref())?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            base_url: parsed,
            project: Self::DEFAULT_PROJECT.to_string(),
            database: Self::DEFAULT_DATABASE.to_string(),
            parent: conference_parent(Self::DEFAULT_CONFERENCE),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            timeout: None,
            user_agent: format!("htics/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Sets the project id.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Sets the database id.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Sets the parent document path from a conference code.
    pub fn with_conference(mut self, conference: impl AsRef<str>) -> Self {
        self.parent = conference_parent(conference.as_ref());
        self
    }

    /// Sets the event collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the `:runQuery` endpoint for the parent document.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured segments do not form a valid URL.
    pub fn run_query_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!(
            "projects/{}/databases/{}/documents/{}:runQuery",
            self.project, self.database, self.parent
        ))
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL).expect("default Firestore base URL should be valid")
    }
}

fn conference_parent(conference: &str) -> String {
    format!("conferences/{conference}")
}
