//! Twitter API integration module.
//!
//! The consumer talks to Twitter through the [`TweetPoster`] trait, so it can
//! be driven by the real [`TwitterClient`] or by an in-memory poster in tests.

mod account;
mod api;
mod tweets;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::PostError;

pub use api::{TwitterClient, DEFAULT_API_BASE};

// Crate-internal re-exports (used by tests)
#[allow(unused_imports)]
pub(crate) use api::{extract_api_error_message, sanitize_for_logging};

/// The authenticated account, as returned by credential verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    pub name: String,
    pub screen_name: String,
}

/// A successfully posted status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostResult {
    #[serde(rename = "id_str")]
    pub id: String,
    pub text: String,
    /// Twitter's timestamp, e.g. `Wed Oct 10 20:19:24 +0000 2018`
    pub created_at: String,
}

/// Options for [`TweetPoster::post_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOptions {
    /// Ask Twitter to return only the user id instead of the full user object.
    pub trim_user: bool,
    /// Reject texts over the platform limit locally, before any request.
    pub verify_length: bool,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            trim_user: true,
            verify_length: true,
        }
    }
}

/// Capability to authenticate with and post to the remote service.
#[async_trait]
pub trait TweetPoster: Send + Sync {
    /// Verifies the configured credentials and returns the account they belong to.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::Auth`] if the service rejects the credentials, or
    /// [`PostError::Unknown`] for transport and decoding failures.
    async fn verify_credentials(&self) -> Result<Identity, PostError>;

    /// Posts a status update.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::Submission`] if the service (or the local length
    /// check) rejects the post, or [`PostError::Unknown`] for transport and
    /// decoding failures.
    async fn post_update(&self, text: &str, options: PostOptions) -> Result<PostResult, PostError>;
}

#[async_trait]
impl TweetPoster for TwitterClient {
    async fn verify_credentials(&self) -> Result<Identity, PostError> {
        self.fetch_identity().await
    }

    async fn post_update(&self, text: &str, options: PostOptions) -> Result<PostResult, PostError> {
        self.update_status(text, options).await
    }
}
