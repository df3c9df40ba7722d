//! deCONZ adapter error types.

use voxhub_domain::error::VoxHubError;

/// Errors specific to the deCONZ adapter.
#[derive(Debug, thiserror::Error)]
pub enum DeconzError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent, or the response body could not be read.
    #[error("request to {path} failed")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The gateway answered with a non-2xx status.
    #[error("gateway answered {status} for {path}")]
    Status { path: String, status: u16 },

    /// The response body is not the JSON the gateway is expected to send.
    #[error("unexpected response body from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The resource body lacks the object carrying `on` / `bri`.
    #[error("response from {path} has no `{field}` object")]
    MissingField { path: String, field: &'static str },
}

impl DeconzError {
    /// Whether the request was abandoned because a timeout elapsed.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

impl From<DeconzError> for VoxHubError {
    fn from(err: DeconzError) -> Self {
        VoxHubError::Transport(Box::new(err))
    }
}
