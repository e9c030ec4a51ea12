//! Error types for remote execution.

use thiserror::Error;

/// Failures talking to the remote execution service.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The service answered with a non-success HTTP status.
    #[error("Server error: {0}")]
    Status(u16),

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("Invalid response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for ExecError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => ExecError::Status(code),
            other => ExecError::Transport(other.to_string()),
        }
    }
}
