//! CloudStack transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudstackError {
    #[error("cmk not found. Please install CloudMonkey: https://github.com/apache/cloudstack-cloudmonkey")]
    CmkNotFound,

    #[error("cmk authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("cmk command failed: {0}")]
    CommandFailed(String),

    #[error("unexpected cmk output: {0}")]
    UnexpectedOutput(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CloudstackError>;
