use reqwest::StatusCode;

/// Failure of a single backend request.
///
/// Variants carry rendered messages rather than the underlying `reqwest::Error`
/// so results can be cloned into chat entries and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Transport(String),

    #[error("The server took too long to respond")]
    Timeout,

    #[error("You are not signed in")]
    Unauthenticated,

    #[error("Server error ({0})")]
    Status(u16),

    #[error("Unexpected response from server: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Map a non-success status onto the taxonomy. 401/403 mean the session
    /// cookie is missing or expired.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthenticated,
            other => ApiError::Status(other.as_u16()),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status)
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Why a submit was refused before any request went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("Still waiting for the previous reply")]
    Pending,

    #[error("Nothing to send")]
    Empty,

    #[error("This action was already confirmed")]
    AlreadyConfirmed,

    #[error("This action has expired, ask again")]
    Superseded,
}
