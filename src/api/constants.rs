//! API constants for the survey backend

/// Token issuance endpoint
pub const AUTH_TOKEN_PATH: &str = "/api/auth/token";

/// AI draft generation endpoint
pub const GENERATE_SURVEY_PATH: &str = "/api/surveys/generate";

/// Shortest description accepted for generation, in characters
pub const MIN_DESCRIPTION_CHARS: usize = 5;

/// Longest description the backend accepts for generation, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Idle connections kept per host
pub const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Standard headers for survey backend requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

pub fn user_agent() -> String {
    format!("survey-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Join a base URL and an absolute API path without doubling slashes
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
