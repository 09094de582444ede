use super::constants::{self, headers};
use super::error::ApiError;
use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// One outbound API call, replayable as-is
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// Sent as `Authorization: Bearer <token>` when present
    pub bearer: Option<String>,
    /// Set once the request has been replayed after a 401
    pub retry: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            bearer: None,
            retry: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn mark_retry(mut self) -> Self {
        self.retry = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests; status codes are returned, not turned into errors
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Production transport over a pooled reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration, connect_timeout: Duration) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(constants::POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(constants::user_agent())
            .build()?;

        Ok(Self::with_custom_client(base_url, http_client))
    }

    pub fn with_custom_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = constants::endpoint(&self.base_url, &request.path);
        debug!("{} {} (retry: {})", request.method, url, request.retry);

        let mut builder = self
            .http_client
            .request(request.method.clone(), &url)
            .header("Accept", headers::CONTENT_TYPE_JSON);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} {} -> {}", request.method, url, status);

        Ok(ApiResponse { status, body })
    }
}
