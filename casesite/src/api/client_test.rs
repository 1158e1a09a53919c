use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::fake::{FakeTransport, ok};
use crate::auth::MemoryTokens;

fn tokens(access: &str, refresh: &str) -> MemoryTokens {
    MemoryTokens::new(Some(access.into()), Some(refresh.into()))
}

/// Accepts bearer `fresh`, rejects everything else, and refreshes `r1`.
fn backend() -> FakeTransport {
    FakeTransport::new(|req| {
        if req.path == REFRESH_PATH {
            return ok(&json!({"access": "fresh"}));
        }
        match req.bearer.as_deref() {
            Some("fresh") => ok(&json!({"path": req.path})),
            _ => ApiResponse::new(401, r#"{"detail":"Given token not valid"}"#),
        }
    })
}

#[tokio::test]
async fn attaches_bearer_token() {
    let client = ApiClient::new(backend(), tokens("fresh", "r1"));
    let body = client.get_json("profile/").await.expect("profile");
    assert_eq!(body, json!({"path": "profile/"}));
    assert_eq!(client.transport().last().and_then(|r| r.bearer).as_deref(), Some("fresh"));
}

#[tokio::test]
async fn refreshes_once_and_retries_on_401() {
    let client = ApiClient::new(backend(), tokens("stale", "r1"));
    let body = client.get_json("cases/my_cases/").await.expect("retried");
    assert_eq!(body["path"], "cases/my_cases/");
    assert_eq!(client.transport().count(Method::Post, REFRESH_PATH), 1);
    assert_eq!(client.tokens().access_token().as_deref(), Some("fresh"));

    let refresh = client.transport().requests().into_iter().find(|r| r.path == REFRESH_PATH).expect("refresh call");
    assert_eq!(refresh.body, crate::transport::RequestBody::Json(json!({"refresh": "r1"})));
}

#[tokio::test]
async fn concurrent_401s_share_one_refresh() {
    let client = ApiClient::new(backend(), tokens("stale", "r1"));
    let (a, b, c) = tokio::join!(client.get_json("cases/1/"), client.get_json("cases/2/"), client.get_json("profile/"));
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(client.transport().count(Method::Post, REFRESH_PATH), 1);
}

#[tokio::test]
async fn failed_refresh_clears_tokens_and_fires_hook() {
    let transport = FakeTransport::new(|req| {
        if req.path == REFRESH_PATH {
            ApiResponse::new(401, r#"{"detail":"Token is blacklisted"}"#)
        } else {
            ApiResponse::new(401, "")
        }
    });
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let client = ApiClient::new(transport, tokens("stale", "r1"))
        .on_session_expired(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    let err = client.get_json("cases/my_cases/").await.expect_err("expired");
    assert!(matches!(err, SiteError::Auth));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!client.is_signed_in());
    assert_eq!(client.tokens().refresh_token(), None);
}

#[tokio::test]
async fn concurrent_401s_with_rejected_refresh_fire_hook_once() {
    let transport = FakeTransport::new(|req| {
        if req.path == REFRESH_PATH {
            ApiResponse::new(401, r#"{"detail":"Token is blacklisted"}"#)
        } else {
            ApiResponse::new(401, "")
        }
    });
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let client = ApiClient::new(transport, tokens("stale", "r1"))
        .on_session_expired(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    let (a, b, c) = tokio::join!(client.get_json("cases/1/"), client.get_json("cases/2/"), client.get_json("profile/"));
    for result in [a, b, c] {
        assert!(matches!(result, Err(SiteError::Auth)));
    }
    assert_eq!(client.transport().count(Method::Post, REFRESH_PATH), 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_refresh_token_expires_without_calling_backend() {
    let client = ApiClient::new(backend(), MemoryTokens::new(Some("stale".into()), None));
    let err = client.get_json("profile/").await.expect_err("expired");
    assert!(matches!(err, SiteError::Auth));
    assert_eq!(client.transport().count(Method::Post, REFRESH_PATH), 0);
}

#[tokio::test]
async fn error_status_carries_backend_message() {
    let transport = FakeTransport::new(|_| ApiResponse::new(400, r#"{"subdomain":["This subdomain is taken."]}"#));
    let client = ApiClient::new(transport, tokens("fresh", "r1"));
    let err = client.get_json("cases/1/deploy/").await.expect_err("rejected");
    assert_eq!(err.to_string(), "request failed (400): subdomain: This subdomain is taken.");
}

#[tokio::test]
async fn transport_failure_is_not_retried() {
    let client = ApiClient::new(FakeTransport::failing("offline"), tokens("fresh", "r1"));
    let err = client.get_json("templates/").await.expect_err("offline");
    assert!(err.retryable());
    assert_eq!(client.transport().requests().len(), 1);
}

#[tokio::test]
async fn login_stores_token_pair() {
    let transport = FakeTransport::new(|req| {
        assert_eq!(req.path, LOGIN_PATH);
        assert_eq!(req.bearer, None);
        ok(&json!({"access": "a", "refresh": "r"}))
    });
    let client = ApiClient::new(transport, MemoryTokens::default());
    client.login("jane", "secret").await.expect("login");
    assert_eq!(client.tokens().access_token().as_deref(), Some("a"));
    assert_eq!(client.tokens().refresh_token().as_deref(), Some("r"));
    client.logout();
    assert!(!client.is_signed_in());
}
