use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the chat completion call. None of them is retried.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("invalid chat base url {0}")]
    InvalidBaseUrl(String),
    #[error("chat service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat service error {status}: {message}")]
    Service { status: StatusCode, message: String },
    #[error("chat service returned no answer")]
    EmptyReply,
}

impl AdvisorError {
    /// `true` when the service refused the API key.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Service { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}
