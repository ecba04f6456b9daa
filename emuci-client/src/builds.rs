//! Job submission and build metadata endpoints

use async_trait::async_trait;
use emuci_core::dto::build::BuildInfo;
use emuci_core::dto::job::JobParameters;
use emuci_core::dto::queue::QueueItem;
use reqwest::header::LOCATION;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::queue::parse_queue_location;
use crate::{BuildServer, JenkinsClient, job_path};

impl JenkinsClient {
    /// Trigger a parameterised build
    ///
    /// Anonymous submissions carry a CSRF crumb when the server issues one.
    ///
    /// # Returns
    /// The queue item number the submission was placed under
    pub(crate) async fn build_with_parameters(
        &self,
        job: &str,
        parameters: &JobParameters,
    ) -> Result<u64> {
        if job.trim().is_empty() {
            return Err(ClientError::InvalidRequest("job name is empty".to_string()));
        }

        let url = format!("{}/{}/buildWithParameters", self.base_url, job_path(job));
        debug!("Submitting {} with {} parameter(s)", url, parameters.len());

        let mut request = self.authorize(self.client.post(&url).query(parameters));
        let crumb = match &self.credentials {
            Some(_) => None,
            None => self.get_crumb().await?,
        };
        if let Some(crumb) = crumb {
            request = request.header(crumb.crumb_request_field.as_str(), crumb.crumb.as_str());
        }

        let response = self.check_status(request.send().await?).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ClientError::ParseError("Submission response has no Location header".to_string())
            })?;

        parse_queue_location(location)
    }

    /// Get a build's metadata
    pub(crate) async fn get_build_info(&self, job: &str, build_id: i64) -> Result<BuildInfo> {
        let url = format!("{}/{}/{}/api/json", self.base_url, job_path(job), build_id);
        let response = self.authorize(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl BuildServer for JenkinsClient {
    async fn submit_job(&self, job: &str, parameters: &JobParameters) -> Result<u64> {
        self.build_with_parameters(job, parameters).await
    }

    async fn queue_item(&self, id: u64) -> Result<QueueItem> {
        self.get_queue_item(id).await
    }

    async fn build_info(&self, job: &str, build_id: i64) -> Result<BuildInfo> {
        self.get_build_info(job, build_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Credentials;
    use crate::testing::{json_response, serve_once, serve_sequence};

    fn created(queue_id: u64) -> String {
        format!(
            "HTTP/1.1 201 Created\r\nLocation: http://ci/queue/item/{queue_id}/\r\n\
             Content-Length: 0\r\nConnection: close\r\n\r\n"
        )
    }

    #[tokio::test]
    async fn test_submit_job_returns_queue_id() {
        let (url, request) = serve_once(created(4711)).await;

        let mut params = JobParameters::new();
        params.insert("BRANCH".to_string(), "feature/uart".to_string());

        let client = JenkinsClient::new(url).with_credentials(Credentials {
            user: "ci".to_string(),
            api_token: "secret".to_string(),
        });
        let queue_id = client.submit_job("riscvemu", &params).await.unwrap();

        assert_eq!(queue_id, 4711);
        let request = request.await.unwrap();
        assert!(
            request.starts_with("POST /job/riscvemu/buildWithParameters?BRANCH=feature%2Fuart")
        );
        assert!(request.to_lowercase().contains("authorization: basic"));
    }

    #[tokio::test]
    async fn test_anonymous_submission_sends_crumb() {
        let body = r#"{"crumb": "3f2a9c", "crumbRequestField": "Jenkins-Crumb"}"#;
        let crumb = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
             Set-Cookie: JSESSIONID=node0abc; Path=/\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (url, requests) = serve_sequence(vec![crumb, created(12)]).await;

        let queue_id = JenkinsClient::new(url)
            .submit_job("riscvemu", &JobParameters::new())
            .await
            .unwrap();

        assert_eq!(queue_id, 12);
        let requests = requests.await.unwrap();
        assert!(requests[0].starts_with("GET /crumbIssuer/api/json"));
        let submission = requests[1].to_lowercase();
        assert!(submission.starts_with("post /job/riscvemu/buildwithparameters"));
        assert!(submission.contains("jenkins-crumb: 3f2a9c"));
        assert!(submission.contains("cookie: jsessionid=node0abc"));
    }

    #[tokio::test]
    async fn test_submission_without_crumb_issuer() {
        let (url, requests) =
            serve_sequence(vec![json_response("404 Not Found", ""), created(13)]).await;

        let queue_id = JenkinsClient::new(url)
            .submit_job("riscvemu", &JobParameters::new())
            .await
            .unwrap();

        assert_eq!(queue_id, 13);
        let requests = requests.await.unwrap();
        assert!(!requests[1].to_lowercase().contains("jenkins-crumb"));
    }

    #[tokio::test]
    async fn test_submit_job_without_location_fails() {
        let (url, _request) = serve_sequence(vec![
            json_response("404 Not Found", ""),
            json_response("201 Created", ""),
        ])
        .await;

        let err = JenkinsClient::new(url)
            .submit_job("riscvemu", &JobParameters::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_submit_job_rejects_empty_name() {
        let err = JenkinsClient::new("http://localhost:1")
            .submit_job(" ", &JobParameters::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_build_info_path() {
        let (url, request) = serve_once(json_response("200 OK", r#"{"actions": []}"#)).await;

        let build = JenkinsClient::new(url)
            .build_info("emulators/riscvemu", 12)
            .await
            .unwrap();

        assert!(build.actions.is_empty());
        assert!(
            request
                .await
                .unwrap()
                .starts_with("GET /job/emulators/job/riscvemu/12/api/json")
        );
    }
}
