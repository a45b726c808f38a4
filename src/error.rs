//! Errors the screen has to branch on.

use thiserror::Error;

/// Why a simulation request failed. Callers treat every variant the same
/// way; the distinction is kept for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulateError {
    /// The request could not be sent or no response arrived.
    #[error("simulation request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("simulation server responded with {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not `{ "summary": { … } }`.
    #[error("malformed simulation response: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for SimulateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SimulateError::Transport(format!("timed out: {err}"))
        } else {
            SimulateError::Transport(err.to_string())
        }
    }
}

/// Why the "see full simulation" action could not open the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    #[error("no simulation file available")]
    Missing,
    #[error("opening files is not supported on this target")]
    Unsupported,
    #[error("failed to open {url}: {reason}")]
    Launch { url: String, reason: String },
}
