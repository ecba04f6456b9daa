//! Configuration module
//!
//! Handles CLI configuration: build server location, credentials and request
//! timeout.

use anyhow::{Context, Result, bail};
use emuci_client::{Credentials, JenkinsClient};
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the build server
    pub server_url: String,
    pub credentials: Option<Credentials>,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
}

impl Config {
    /// Builds the configuration from optional user name and API token
    ///
    /// Credentials are only used when both halves are given.
    pub fn new(
        server_url: impl Into<String>,
        user: Option<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        let credentials = match (user, api_token) {
            (Some(user), Some(api_token)) => Some(Credentials { user, api_token }),
            _ => None,
        };
        Self {
            server_url: server_url.into(),
            credentials,
            timeout,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            bail!(
                "Server URL must start with http:// or https://, got '{}'",
                self.server_url
            );
        }
        if self.timeout.is_zero() {
            bail!("Request timeout must be greater than zero");
        }
        Ok(())
    }

    /// Creates a build server client for this configuration
    pub fn client(&self) -> Result<JenkinsClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        let client = JenkinsClient::with_client(&self.server_url, http);
        Ok(match &self.credentials {
            Some(credentials) => client.with_credentials(credentials.clone()),
            None => client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, timeout: u64) -> Config {
        Config::new(url, None, None, Duration::from_secs(timeout))
    }

    #[test]
    fn test_validate_server_url() {
        assert!(config("http://10.10.1.15:8066", 10).validate().is_ok());
        assert!(config("https://ci.example.org/", 10).validate().is_ok());

        let err = config("ci.example.org", 10).validate().unwrap_err();
        assert!(err.to_string().contains("ci.example.org"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(config("http://localhost:8080", 0).validate().is_err());
    }

    #[test]
    fn test_credentials_need_user_and_token() {
        let partial = Config::new(
            "http://localhost:8080",
            Some("ci-bot".to_string()),
            None,
            Duration::from_secs(10),
        );
        assert!(partial.credentials.is_none());

        let full = Config::new(
            "http://localhost:8080",
            Some("ci-bot".to_string()),
            Some("s3cret".to_string()),
            Duration::from_secs(10),
        );
        assert_eq!(full.credentials.unwrap().user, "ci-bot");
    }

    #[test]
    fn test_client_uses_server_url() {
        let client = config("http://localhost:8080/", 10).client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
