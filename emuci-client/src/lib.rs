//! emuci build server client
//!
//! A small, type-safe HTTP client for the Jenkins-style build server that runs
//! the emulator's CI jobs.
//!
//! Only three operations are needed by the tools: submitting a parameterised
//! job, reading a queue item, and reading a build's metadata. They are exposed
//! through the [`BuildServer`] trait so that callers can be exercised against an
//! in-memory server in tests.
//!
//! # Example
//!
//! ```no_run
//! use emuci_client::{BuildServer, JenkinsClient};
//! use emuci_core::dto::job::JobParameters;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JenkinsClient::new("http://localhost:8080");
//!
//!     let mut params = JobParameters::new();
//!     params.insert("BRANCH".to_string(), "master".to_string());
//!     let queue_id = client.submit_job("riscvemu", &params).await?;
//!
//!     let item = client.queue_item(queue_id).await?;
//!     println!("Queue item {} resolved: {}", item.id, item.is_resolved());
//!     Ok(())
//! }
//! ```

mod builds;
mod crumb;
pub mod error;
mod queue;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use emuci_core::domain::build::ParentJobInfo;
use emuci_core::dto::build::BuildInfo;
use emuci_core::dto::job::JobParameters;
use emuci_core::dto::queue::QueueItem;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Operations the CI tools need from the build server
#[async_trait]
pub trait BuildServer: Send + Sync {
    /// Submits a job with parameters, returning the queue item id
    async fn submit_job(&self, job: &str, parameters: &JobParameters) -> Result<u64>;

    /// Fetches the current state of a queue item
    async fn queue_item(&self, id: u64) -> Result<QueueItem>;

    /// Fetches a build's metadata
    async fn build_info(&self, job: &str, build_id: i64) -> Result<BuildInfo>;

    /// Looks up the upstream build that triggered `job` #`build_id`
    ///
    /// Builds without an upstream cause yield [`ParentJobInfo::none`].
    async fn parent_job_info(&self, job: &str, build_id: i64) -> Result<ParentJobInfo> {
        let build = self.build_info(job, build_id).await?;
        Ok(ParentJobInfo::from_build(&build))
    }
}

/// Credentials for the build server (user name plus API token)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub api_token: String,
}

/// HTTP client for the Jenkins REST API
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    credentials: Option<Credentials>,
}

impl JenkinsClient {
    /// Create a new client with a default HTTP client
    ///
    /// # Example
    /// ```
    /// use emuci_client::JenkinsClient;
    ///
    /// let client = JenkinsClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .unwrap_or_default();
        Self::with_client(base_url, client)
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    /// Anonymous submissions need the client's cookie store enabled: the
    /// server ties CSRF crumbs to the session cookie.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
        }
    }

    /// Authenticate every request with HTTP basic auth
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.user, Some(&c.api_token)),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and turn error responses into [`ClientError::ApiError`]
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        self.check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Converts a job name into its URL path
///
/// Jobs nested in folders (`folder/job`) live under `job/folder/job/job`.
pub(crate) fn job_path(name: &str) -> String {
    name.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("job/{}", segment))
        .collect::<Vec<_>>()
        .join("/")
}
