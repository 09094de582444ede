use super::constants::{self, headers};
use super::error::AuthError;
use crate::auth::{Credentials, TokenStore};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Something that can issue a new bearer token
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self) -> Result<String, AuthError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Issues tokens from the backend's login endpoint
pub struct HttpTokenIssuer {
    token_url: String,
    credentials: Credentials,
    http_client: reqwest::Client,
}

impl HttpTokenIssuer {
    pub fn new(base_url: &str, credentials: Credentials, timeout: Duration) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(constants::user_agent())
            .build()?;

        Ok(Self {
            token_url: constants::endpoint(base_url, constants::AUTH_TOKEN_PATH),
            credentials,
            http_client,
        })
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    async fn issue(&self) -> Result<String, AuthError> {
        info!("Requesting token from {}", self.token_url);

        let response = self
            .http_client
            .post(&self.token_url)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(&self.credentials)
            .send()
            .await?;

        let status = response.status();
        debug!("Token request status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Rejected { status, body });
        }

        let parsed: Option<TokenResponse> = serde_json::from_str(&body).ok();
        match parsed.and_then(|r| r.access_token).filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => Err(AuthError::MissingToken(body)),
        }
    }
}

#[derive(Debug, Default)]
struct AuthState {
    token: Option<String>,
    error: Option<String>,
}

/// Clears the in-flight flag when a fetch ends, including when its future is dropped
struct FetchingGuard<'a>(&'a AtomicBool);

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Holds the bearer token and coordinates refreshes.
///
/// At most one token fetch runs at a time; callers arriving while one is in
/// flight get the currently held token back instead of starting another.
pub struct AuthManager {
    issuer: Arc<dyn TokenIssuer>,
    store: Arc<dyn TokenStore>,
    state: RwLock<AuthState>,
    fetching: AtomicBool,
}

impl AuthManager {
    /// Create a manager seeded from durable storage
    pub fn new(issuer: Arc<dyn TokenIssuer>, store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => {
                if token.is_some() {
                    debug!("Loaded persisted token");
                }
                token
            }
            Err(e) => {
                warn!("Failed to read persisted token: {}", e);
                None
            }
        };

        Self {
            issuer,
            store,
            state: RwLock::new(AuthState { token, error: None }),
            fetching: AtomicBool::new(false),
        }
    }

    /// Obtain a new token from the issuer.
    ///
    /// Returns the held token unchanged if a fetch is already running.
    pub async fn fetch_token(&self) -> Result<Option<String>, AuthError> {
        if self
            .fetching
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Token fetch already in progress, returning current token");
            return Ok(self.token().await);
        }
        let _fetching = FetchingGuard(&self.fetching);

        self.state.write().await.error = None;
        let result = self.issuer.issue().await;

        let mut state = self.state.write().await;
        match result {
            Ok(token) => {
                if let Err(e) = self.store.save(&token) {
                    warn!("Failed to persist token: {}", e);
                }
                state.token = Some(token.clone());
                info!("Obtained new bearer token");
                Ok(Some(token))
            }
            Err(e) => {
                warn!("Token fetch failed: {}", e);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Forget the token in memory and in storage
    pub async fn clear_token(&self) {
        self.state.write().await.token = None;
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear persisted token: {}", e);
        }
        info!("Cleared bearer token");
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    pub async fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Message from the most recent failed fetch
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }
}
