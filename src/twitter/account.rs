//! Account operations for the Twitter API.

use log::{debug, info};
use reqwest::Method;

use super::api::{RequestFailure, TwitterClient};
use super::Identity;
use crate::error::PostError;

impl TwitterClient {
    /// Verifies the configured credentials via `account/verify_credentials`.
    ///
    /// # Returns
    ///
    /// - `Ok(Identity)`: The account the credentials belong to
    /// - `Err(PostError::Auth)`: If Twitter rejects the request
    /// - `Err(PostError::Unknown)`: On network errors or an unreadable response
    pub async fn fetch_identity(&self) -> Result<Identity, PostError> {
        info!("Verifying Twitter API credentials");

        let params = vec![("skip_status".to_string(), "true".to_string())];
        let body = self
            .signed_request(
                Method::GET,
                "account/verify_credentials.json",
                &params,
                "verify_credentials",
            )
            .await
            .map_err(|failure| match failure {
                RequestFailure::Status { status, message } => {
                    PostError::Auth(format!("{} ({})", message, status))
                }
                RequestFailure::Transport(message) => PostError::Unknown(message),
            })?;

        let identity: Identity = serde_json::from_str(&body).map_err(|e| {
            PostError::Unknown(format!("Unexpected verify_credentials response: {}", e))
        })?;
        debug!(
            "Credentials belong to {} (@{})",
            identity.name, identity.screen_name
        );
        Ok(identity)
    }
}
