//! Tweet operations for the Twitter API.

use log::{debug, error, info};
use reqwest::Method;

use super::api::{RequestFailure, TwitterClient};
use super::{PostOptions, PostResult};
use crate::error::PostError;
use crate::tweet::{relative_length, PLATFORM_CHARACTER_LIMIT};

impl TwitterClient {
    /// Posts a status update via `statuses/update`.
    ///
    /// With `options.verify_length`, texts over Twitter's own hard limit are
    /// rejected before any request is made.
    ///
    /// # Returns
    ///
    /// - `Ok(PostResult)`: The posted status
    /// - `Err(PostError::Submission)`: If the text is too long or Twitter rejects the post
    /// - `Err(PostError::Unknown)`: On network errors or an unreadable response
    pub async fn update_status(
        &self,
        text: &str,
        options: PostOptions,
    ) -> Result<PostResult, PostError> {
        info!("Starting tweet post operation for text: '{}'", text);

        if options.verify_length {
            let length = relative_length(text);
            if length > PLATFORM_CHARACTER_LIMIT {
                error!(
                    "Refusing to post text of length {} (limit {})",
                    length, PLATFORM_CHARACTER_LIMIT
                );
                return Err(PostError::Submission(format!(
                    "Text is {} characters, over the limit of {}",
                    length, PLATFORM_CHARACTER_LIMIT
                )));
            }
        }

        let mut params = vec![("status".to_string(), text.to_string())];
        if options.trim_user {
            params.push(("trim_user".to_string(), "true".to_string()));
        }
        debug!("Tweet parameters: {:?}", params);

        let body = self
            .signed_request(Method::POST, "statuses/update.json", &params, "post_update")
            .await
            .map_err(|failure| match failure {
                RequestFailure::Status { status, message } => {
                    PostError::Submission(format!("{} ({})", message, status))
                }
                RequestFailure::Transport(message) => PostError::Unknown(message),
            })?;

        serde_json::from_str(&body)
            .map_err(|e| PostError::Unknown(format!("Unexpected statuses/update response: {}", e)))
    }
}
