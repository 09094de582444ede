use super::auth::AuthManager;
use super::constants;
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, HttpTransport};
use crate::survey::SurveyPayload;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

/// Survey backend client that keeps requests authorized.
///
/// Every request carries the held bearer token. A 401 triggers one token
/// refresh and one replay of the original request; a 401 on the replay is
/// returned to the caller.
#[derive(Clone)]
pub struct SurveyClient {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<AuthManager>,
}

impl SurveyClient {
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<AuthManager>) -> Self {
        Self { transport, auth }
    }

    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    /// Send a request, refreshing the token once on a 401
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let token = self.auth.token().await;
        let request = request.with_bearer(token);
        let response = self.transport.execute(&request).await?;

        if response.status != StatusCode::UNAUTHORIZED || request.retry {
            return Self::check_status(response);
        }

        info!("{} {} returned 401, refreshing token", request.method, request.path);
        let replay = request.mark_retry();

        let token = match self.auth.fetch_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                // Another refresh is in flight and no token is held yet
                warn!("No token available to replay {} {}", replay.method, replay.path);
                return Err(ApiError::from_status(response.status, response.body));
            }
            Err(refresh_error) => {
                warn!("Token refresh failed: {}", refresh_error);
                self.auth.clear_token().await;
                return Err(ApiError::from_status(response.status, response.body));
            }
        };

        let replay = replay.with_bearer(Some(token));
        let replayed = self.transport.execute(&replay).await?;
        debug!("Replayed {} {} -> {}", replay.method, replay.path, replayed.status);
        Self::check_status(replayed)
    }

    fn check_status(response: ApiResponse) -> Result<ApiResponse, ApiError> {
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(response.status, response.body))
        }
    }

    /// Ask the backend to draft a survey from a free-text description
    pub async fn generate_survey(&self, description: &str) -> Result<SurveyPayload, ApiError> {
        let description = validate_description(description)?;

        if !self.auth.is_authenticated().await {
            // Not fatal: without a token the 401 path below gets another try
            if let Err(e) = self.auth.fetch_token().await {
                warn!("Could not obtain a token before generating: {}", e);
            }
        }

        let request = ApiRequest::post(
            constants::GENERATE_SURVEY_PATH,
            json!({ "description": description }),
        );

        match self.send(request).await {
            Ok(response) => {
                let payload = SurveyPayload::from_json_str(&response.body)?;
                info!("Generated survey with {} questions", payload.questions.len());
                Ok(payload)
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.auth.clear_token().await;
                }
                Err(e)
            }
        }
    }
}

/// Trimmed description, or a validation error if its length is out of bounds
pub fn validate_description(description: &str) -> Result<&str, ApiError> {
    let trimmed = description.trim();
    let length = trimmed.chars().count();

    if length < constants::MIN_DESCRIPTION_CHARS {
        return Err(ApiError::Validation(format!(
            "Please enter at least {} characters in the title or description before generating.",
            constants::MIN_DESCRIPTION_CHARS
        )));
    }
    if length > constants::MAX_DESCRIPTION_CHARS {
        return Err(ApiError::Validation(format!(
            "Descriptions are limited to {} characters.",
            constants::MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(trimmed)
}
