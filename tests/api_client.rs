//! Authorized request tests for SurveyClient

mod common;

use common::{BlockingIssuer, CountingIssuer, ScriptedTransport, manager_with};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use survey_cli::api::constants::GENERATE_SURVEY_PATH;
use survey_cli::api::{ApiError, ApiRequest, SurveyClient};
use survey_cli::auth::TokenStore;
use survey_cli::survey::QuestionKind;

const GENERATED: &str = r#"{
    "title": "Team offsite feedback",
    "questions": [
        {"type": "npsScore", "title": "How likely are you to recommend the offsite?"},
        {"type": "singleChoice", "title": "Best day?", "options": ["Monday", "Tuesday"]}
    ]
}"#;

/// The held token is attached as the bearer credential
#[tokio::test]
async fn test_bearer_attached() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::OK, "{}")]));
    let (auth, _) = manager_with(Arc::new(CountingIssuer::succeeding()), Some("held"));
    let client = SurveyClient::new(transport.clone(), auth);

    let response = client.send(ApiRequest::get("/api/ping")).await.unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].bearer.as_deref(), Some("held"));
    assert!(!requests[0].retry);
}

/// Without a token the request goes out with no bearer
#[tokio::test]
async fn test_no_token_no_bearer() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::OK, "{}")]));
    let (auth, _) = manager_with(Arc::new(CountingIssuer::succeeding()), None);
    let client = SurveyClient::new(transport.clone(), auth);

    client.send(ApiRequest::get("/api/ping")).await.unwrap();

    assert_eq!(transport.requests()[0].bearer, None);
}

/// A 401 triggers exactly one refresh and a replay carrying the new token
#[tokio::test]
async fn test_unauthorized_refreshes_and_replays_once() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        (StatusCode::UNAUTHORIZED, "expired"),
        (StatusCode::OK, r#"{"ok":true}"#),
    ]));
    let issuer = Arc::new(CountingIssuer::succeeding());
    let (auth, store) = manager_with(issuer.clone(), Some("stale"));
    let client = SurveyClient::new(transport.clone(), auth);

    let request = ApiRequest::post("/api/things", json!({"name": "x"}));
    let response = client.send(request).await.unwrap();

    assert_eq!(response.body, r#"{"ok":true}"#);
    assert_eq!(issuer.calls(), 1);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].bearer.as_deref(), Some("stale"));
    assert_eq!(requests[1].bearer.as_deref(), Some("token-1"));
    assert!(requests[1].retry);
    assert_eq!(requests[1].body, requests[0].body);
    assert_eq!(requests[1].path, "/api/things");
    assert_eq!(store.load().unwrap().as_deref(), Some("token-1"));
}

/// A 401 on the replay is returned without a second refresh
#[tokio::test]
async fn test_second_unauthorized_propagates() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        (StatusCode::UNAUTHORIZED, "expired"),
        (StatusCode::UNAUTHORIZED, "still expired"),
    ]));
    let issuer = Arc::new(CountingIssuer::succeeding());
    let (auth, _) = manager_with(issuer.clone(), Some("stale"));
    let client = SurveyClient::new(transport.clone(), auth);

    let err = client.send(ApiRequest::get("/api/ping")).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(issuer.calls(), 1);
    assert_eq!(transport.call_count(), 2);
}

/// When the refresh fails the token is cleared and the original 401 is returned
#[tokio::test]
async fn test_failed_refresh_clears_token() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::UNAUTHORIZED, "expired")]));
    let (auth, store) = manager_with(Arc::new(CountingIssuer::failing()), Some("stale"));
    let client = SurveyClient::new(transport.clone(), auth.clone());

    let err = client.send(ApiRequest::get("/api/ping")).await.unwrap_err();

    match err {
        ApiError::Unauthorized { body, .. } => assert_eq!(body, "expired"),
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert_eq!(transport.call_count(), 1);
    assert!(!auth.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);
}

/// A 401 during someone else's refresh, with no token held, is returned without a tokenless replay
#[tokio::test]
async fn test_unauthorized_while_refresh_in_flight() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::UNAUTHORIZED, "expired")]));
    let issuer = Arc::new(BlockingIssuer::new());
    let (auth, _) = manager_with(issuer.clone(), None);
    let client = SurveyClient::new(transport.clone(), auth.clone());

    let refresh = {
        let auth = auth.clone();
        tokio::spawn(async move { auth.fetch_token().await })
    };
    issuer.started.notified().await;

    let err = client.send(ApiRequest::get("/api/ping")).await.unwrap_err();

    match err {
        ApiError::Unauthorized { body, .. } => assert_eq!(body, "expired"),
        other => panic!("expected unauthorized, got {:?}", other),
    }
    assert_eq!(transport.call_count(), 1);

    issuer.release.notify_one();
    refresh.await.unwrap().unwrap();
    assert_eq!(issuer.calls(), 1);
}

/// Other failure statuses pass through untouched
#[tokio::test]
async fn test_other_status_passthrough() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::INTERNAL_SERVER_ERROR, "boom")]));
    let issuer = Arc::new(CountingIssuer::succeeding());
    let (auth, _) = manager_with(issuer.clone(), Some("held"));
    let client = SurveyClient::new(transport.clone(), auth.clone());

    let err = client.send(ApiRequest::get("/api/ping")).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(issuer.calls(), 0);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(auth.token().await.as_deref(), Some("held"));
}

/// A too-short description is rejected before any network traffic
#[tokio::test]
async fn test_generate_rejects_short_description() {
    let transport = Arc::new(ScriptedTransport::new(vec![]));
    let issuer = Arc::new(CountingIssuer::succeeding());
    let (auth, _) = manager_with(issuer.clone(), None);
    let client = SurveyClient::new(transport.clone(), auth);

    let err = client.generate_survey("  ab  ").await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(transport.call_count(), 0);
    assert_eq!(issuer.calls(), 0);
}

/// Generation fetches a token first when none is held and parses the payload
#[tokio::test]
async fn test_generate_parses_payload() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::OK, GENERATED)]));
    let issuer = Arc::new(CountingIssuer::succeeding());
    let (auth, _) = manager_with(issuer.clone(), None);
    let client = SurveyClient::new(transport.clone(), auth);

    let payload = client.generate_survey("  feedback on the team offsite  ").await.unwrap();

    assert_eq!(payload.title.as_deref(), Some("Team offsite feedback"));
    assert_eq!(payload.questions.len(), 2);
    assert_eq!(payload.questions[0].kind, QuestionKind::NpsScore);
    assert_eq!(payload.questions[1].options, vec!["Monday", "Tuesday"]);

    let requests = transport.requests();
    assert_eq!(issuer.calls(), 1);
    assert_eq!(requests[0].path, GENERATE_SURVEY_PATH);
    assert_eq!(requests[0].bearer.as_deref(), Some("token-1"));
    assert_eq!(requests[0].body, Some(json!({"description": "feedback on the team offsite"})));
}

/// A final 401 from generation leaves the client signed out
#[tokio::test]
async fn test_generate_unauthorized_clears_token() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        (StatusCode::UNAUTHORIZED, "expired"),
        (StatusCode::UNAUTHORIZED, "expired"),
    ]));
    let (auth, store) = manager_with(Arc::new(CountingIssuer::succeeding()), Some("stale"));
    let client = SurveyClient::new(transport.clone(), auth.clone());

    let err = client.generate_survey("quarterly engagement survey").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!auth.is_authenticated().await);
    assert_eq!(store.load().unwrap(), None);
}

/// A malformed generation body surfaces as a payload error
#[tokio::test]
async fn test_generate_rejects_non_object_body() {
    let transport = Arc::new(ScriptedTransport::new(vec![(StatusCode::OK, "[1, 2, 3]")]));
    let (auth, _) = manager_with(Arc::new(CountingIssuer::succeeding()), Some("held"));
    let client = SurveyClient::new(transport, auth);

    let err = client.generate_survey("quarterly engagement survey").await.unwrap_err();

    assert!(matches!(err, ApiError::Payload(_)));
}
