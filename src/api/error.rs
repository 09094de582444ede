use crate::survey::PayloadError;
use reqwest::StatusCode;
use thiserror::Error;

/// Failures obtaining a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Auth failed ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("Auth response missing access_token. Body: {0}")]
    MissingToken(String),
}

/// Failures of calls made through the authenticated client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally; nothing was sent
    #[error("{0}")]
    Validation(String),
    #[error("request was not authorized ({status}): {body}")]
    Unauthorized { status: StatusCode, body: String },
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Classify a non-success status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { status, body }
        } else {
            ApiError::Status { status, body }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()).is_unauthorized());
        assert!(!ApiError::from_status(StatusCode::FORBIDDEN, String::new()).is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream".into()),
            ApiError::Status { status, .. } if status == StatusCode::BAD_GATEWAY
        ));
    }
}
