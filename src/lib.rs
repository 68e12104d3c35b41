//! # Zazu
//!
//! A personal Twitter bot. Each run takes the first line of a queue file,
//! checks that it fits in a tweet, posts it, and removes it from the file.
//!
//! ## Features
//!
//! - Tweet length validation that counts links as shortened t.co URLs
//! - Queue file consumption with atomic rewrites
//! - Twitter REST API client with OAuth 1.0a request signing
//! - INI configuration with environment variable fallback for credentials
//! - Structured line-based logging to standard error or a file
//!
//! ## Configuration
//!
//! The configuration file (default `config.ini`) has an `[api]` section with
//! `consumer_key`, `consumer_secret`, `access_token_key` and
//! `access_token_secret`, and an optional `[general]` section with
//! `random_time` (seconds, default 300).
//!
//! ## Run behaviour
//!
//! - Invalid lines are logged and dropped from the queue
//! - The first valid line is posted and dropped from the queue
//! - If authentication or posting fails, the queue file is left untouched

pub mod config;
pub mod consumer;
pub mod error;
pub mod logging;
pub mod oauth;
pub mod queue;
pub mod tweet;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{ApiCredentials, Config, GeneralConfig};
pub use consumer::{QueueConsumer, RunOutcome};
pub use error::{ConfigError, PostError, ZazuError};
pub use queue::{QueueHead, TweetQueue};
pub use tweet::is_valid_tweet;
pub use twitter::{Identity, PostOptions, PostResult, TweetPoster, TwitterClient};
