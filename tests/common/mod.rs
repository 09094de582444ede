//! Scripted network fakes shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use survey_cli::api::{ApiError, ApiRequest, ApiResponse, AuthError, AuthManager, HttpTransport, TokenIssuer};
use survey_cli::auth::{MemoryTokenStore, TokenStore};
use tokio::sync::Notify;

/// Transport that replays canned responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<(StatusCode, &str)>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|(status, body)| ApiResponse::new(status, body))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted");
        Ok(response)
    }
}

/// Issuer handing out "token-1", "token-2", ... or failing every time
pub struct CountingIssuer {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingIssuer {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for CountingIssuer {
    async fn issue(&self) -> Result<String, AuthError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            Err(AuthError::Rejected {
                status: StatusCode::UNAUTHORIZED,
                body: "bad credentials".to_string(),
            })
        } else {
            Ok(format!("token-{}", call))
        }
    }
}

/// Issuer that parks until released, for observing an in-flight fetch
pub struct BlockingIssuer {
    pub started: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl BlockingIssuer {
    pub fn new() -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for BlockingIssuer {
    async fn issue(&self) -> Result<String, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok("slow-token".to_string())
    }
}

pub fn manager_with(
    issuer: Arc<dyn TokenIssuer>,
    initial_token: Option<&str>,
) -> (Arc<AuthManager>, Arc<MemoryTokenStore>) {
    let store = Arc::new(match initial_token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let manager = Arc::new(AuthManager::new(issuer, store.clone() as Arc<dyn TokenStore>));
    (manager, store)
}
