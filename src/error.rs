//! Error types for zazu.
//!
//! Configuration and queue I/O errors propagate out of `main` and end the
//! process. Failures of the posting collaborator are [`PostError`]s: the
//! consumer catches them, logs them, and ends the run without touching the
//! queue file.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZazuError>;

/// Top-level error for a zazu run.
#[derive(Error, Debug)]
pub enum ZazuError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Queue file error: {0}")]
    Queue(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ZazuError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ZazuError::Config(_) => 1,
            ZazuError::Queue(_) => 1,
            ZazuError::Logging(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("Missing required field '{key}' in section [{section}]")]
    MissingField { section: String, key: String },

    #[error("Invalid value '{value}' for '{key}' in section [{section}]: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Failure of the remote posting collaborator.
///
/// Every variant is fatal to the current run and leaves the queue untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

impl PostError {
    /// Short name of the error kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PostError::Auth(_) => "AuthError",
            PostError::Submission(_) => "SubmissionError",
            PostError::Unknown(_) => "UnknownError",
        }
    }

    /// Returns the process exit code for a run aborted by this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PostError::Auth(_) => 2,
            PostError::Submission(_) => 3,
            PostError::Unknown(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_authentication_error() {
        let error = PostError::Auth("Invalid or expired token".to_string());
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.kind(), "AuthError");
    }

    #[test]
    fn test_exit_code_submission_error() {
        let error = PostError::Submission("Status is a duplicate.".to_string());
        assert_eq!(error.exit_code(), 3);
        assert_eq!(error.kind(), "SubmissionError");
    }

    #[test]
    fn test_exit_code_unknown_error() {
        let error = PostError::Unknown("connection reset".to_string());
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = ZazuError::Config(ConfigError::MissingField {
            section: "api".to_string(),
            key: "consumer_key".to_string(),
        });
        assert_eq!(error.exit_code(), 1);
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field 'consumer_key' in section [api]"
        );
    }

    #[test]
    fn test_post_error_display() {
        let error = PostError::Submission("Status is over 140 characters.".to_string());
        assert_eq!(
            error.to_string(),
            "Submission failed: Status is over 140 characters."
        );
    }
}
