//! Queue-related API endpoints

use crate::JenkinsClient;
use crate::error::{ClientError, Result};
use emuci_core::dto::queue::QueueItem;

impl JenkinsClient {
    /// Get a queue item by ID
    ///
    /// # Arguments
    /// * `id` - The queue item number returned by a submission
    pub(crate) async fn get_queue_item(&self, id: u64) -> Result<QueueItem> {
        let url = format!("{}/queue/item/{}/api/json", self.base_url, id);
        let response = self.authorize(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }
}

/// Extracts the queue item number from a submission's `Location` header
///
/// The server answers `201 Created` with `Location: <base>/queue/item/<id>/`.
pub(crate) fn parse_queue_location(location: &str) -> Result<u64> {
    let mut segments = location.trim_end_matches('/').rsplit('/');
    let id = segments.next().unwrap_or_default();

    match (segments.next(), segments.next()) {
        (Some("item"), Some("queue")) => id.parse().map_err(|_| {
            ClientError::ParseError(format!("Invalid queue item id in location '{}'", location))
        }),
        _ => Err(ClientError::ParseError(format!(
            "Location '{}' does not point at a queue item",
            location
        ))),
    }
}
