//! Core Twitter API utilities.
//!
//! This module contains the HTTP client and the low-level helper for making
//! OAuth 1.0a signed requests to the Twitter REST API.

use log::{debug, error, info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::config::ApiCredentials;
use crate::oauth::{build_oauth1_header, encode_params, generate_nonce};

/// Base URL of the Twitter REST API v1.1.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1/";

/// Why a signed request did not produce a successful response.
#[derive(Debug)]
pub(crate) enum RequestFailure {
    /// The server answered with a non-success status.
    Status { status: StatusCode, message: String },
    /// The request could not be built, sent, or read.
    Transport(String),
}

/// Client for the Twitter REST API, authenticated with OAuth 1.0a user credentials.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    credentials: ApiCredentials,
    base_url: String,
}

impl TwitterClient {
    /// Creates a client for the public Twitter API.
    ///
    /// No network traffic happens until a request is made.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            http: Client::new(),
            credentials,
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the client at a different API root (e.g. a mock server).
    ///
    /// The base URL should end with a `/` so relative endpoint paths are
    /// appended to it.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a signed request and returns the response body on success.
    ///
    /// For `GET` the parameters go into the query string, for `POST` into a
    /// form-encoded body. Both are included in the OAuth signature.
    pub(crate) async fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
        operation_name: &str,
    ) -> Result<String, RequestFailure> {
        info!("Making signed request for operation: {}", operation_name);

        let mut url = Url::parse(&self.base_url)
            .and_then(|base| base.join(endpoint))
            .map_err(|e| RequestFailure::Transport(format!("Invalid endpoint URL: {}", e)))?;
        url.set_query(None);
        url.set_fragment(None);

        let nonce = generate_nonce()
            .map_err(|e| RequestFailure::Transport(format!("Failed to generate nonce: {}", e)))?;
        let timestamp = chrono::Utc::now().timestamp();
        let auth_header = build_oauth1_header(
            &self.credentials,
            method.as_str(),
            url.as_str(),
            params,
            &nonce,
            timestamp,
        )
        .map_err(|e| RequestFailure::Transport(format!("Failed to sign request: {}", e)))?;

        let encoded = encode_params(params);
        debug!("Request URL: {} {}", method, url);
        debug!("Request headers: Authorization: OAuth [REDACTED]");

        let request_builder = if method == Method::GET {
            if !encoded.is_empty() {
                url.set_query(Some(&encoded));
            }
            self.http.get(url)
        } else {
            self.http
                .request(method, url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encoded)
        };

        let response = request_builder
            .header(AUTHORIZATION, auth_header)
            .send()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        let status = response.status();
        info!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        if status.is_success() {
            info!("Operation '{}' completed successfully", operation_name);
            debug!(
                "Response summary for '{}': {} bytes received",
                operation_name,
                body.len()
            );
            return Ok(body);
        }

        error!("Operation '{}' failed - Status: {}", operation_name, status);
        debug!(
            "Error response for '{}': {}",
            operation_name,
            sanitize_for_logging(&body, 200)
        );

        let message =
            extract_api_error_message(&body).unwrap_or_else(|| sanitize_for_logging(&body, 200));
        Err(RequestFailure::Status { status, message })
    }
}

/// Reduces a Twitter error body (`{"errors":[{"code":..,"message":..}]}`) to
/// its messages, joined with `; `.
pub(crate) fn extract_api_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = json
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|err| {
            let message = err.get("message")?.as_str()?;
            Some(match err.get("code").and_then(|c| c.as_i64()) {
                Some(code) => format!("{} (code {})", message, code),
                None => message.to_string(),
            })
        })
        .collect();

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// Newlines and tabs become spaces, other control characters become `?`, and
/// anything over `max_len` characters is truncated.
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}
