//! CSRF crumb endpoint

use emuci_core::dto::crumb::Crumb;
use tracing::debug;

use crate::JenkinsClient;
use crate::error::Result;

impl JenkinsClient {
    /// Get a CSRF crumb for anonymous state-changing requests
    ///
    /// # Returns
    /// `None` when the server has CSRF protection disabled (no crumb issuer)
    pub(crate) async fn get_crumb(&self) -> Result<Option<Crumb>> {
        let url = format!("{}/crumbIssuer/api/json", self.base_url);
        let response = self.client.get(&url).send().await?;

        match self.handle_response(response).await {
            Ok(crumb) => Ok(Some(crumb)),
            Err(e) if e.is_not_found() => {
                debug!("No crumb issuer at {}, submitting without a crumb", url);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
